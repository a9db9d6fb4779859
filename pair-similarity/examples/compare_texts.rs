use pair_similarity::{similarity_of_sets, Algorithm, Similarity, SimilarityOptions};

fn main() {
    let documents = vec![
        "Welcome to Jimbocho, the town of books and curry!",
        "Welcome to Jimbocho, the city of books and curry!",
        "We welcome you to Jimbocho, the town of books and curry.",
        "Welcome to the town of books and curry, Jimbocho!",
    ];

    // Compares character trigrams with the exact Jaccard index.
    let options = SimilarityOptions::new().with_shingle_length(3);
    let jaccard = Similarity::new(Algorithm::Jaccard, options.clone()).unwrap();
    // Filters pairs through 20 LSH bands before computing the exact index.
    let lsh = Similarity::new(Algorithm::Lsh, options).unwrap();

    for i in 0..documents.len() {
        for j in i + 1..documents.len() {
            let exact = jaccard.of_strings(documents[i], documents[j]).unwrap();
            let filtered = lsh.of_strings(documents[i], documents[j]).unwrap();
            assert!(filtered == 0. || filtered == exact);
            println!("{i},{j},{exact},{filtered}");
        }
    }

    // Sets of integers are compared by their elements.
    let c1 = [0, 1, 2, 3, 4, 5, 6, 7, 8];
    let c4 = [18, 1, 2, 3, 4, 10, 6, 7, 8];
    let score = similarity_of_sets(&c1, &c4, Algorithm::Jaccard, &SimilarityOptions::new()).unwrap();
    assert_eq!(score, 0.6363636363636364);
}
