use pair_similarity::{
    similarity_of_sets, similarity_of_strings, Algorithm, HashMethod, Similarity,
    SimilarityOptions,
};

const S1: &str = "is the of the 100-eyed giant in Greek mythology.";
const S2: &str = "is the of the 100-eyed giant in Greek mythology.";
const S3: &str = "Argus Panoptes is the name of the 100-eyed giant in Norse mythology.";
const S4: &str = "is the of the 100-eyed giant in Greek mythology .";

const C1: [i32; 9] = [0, 1, 2, 3, 4, 5, 6, 7, 8];
const C2: [i32; 9] = [0, 1, 2, 3, 4, 5, 6, 7, 8];
const C3: [i32; 10] = [-1, 1, 2, 3, 4, 5, 6, 7, 8, 9];
const C4: [i32; 9] = [18, 1, 2, 3, 4, 10, 6, 7, 8];

const ALGORITHMS: [Algorithm; 3] = [Algorithm::Jaccard, Algorithm::MinHash, Algorithm::Lsh];

fn trigram_options() -> SimilarityOptions {
    SimilarityOptions::new().with_shingle_length(3)
}

#[test]
fn test_exact_sets() {
    let options = SimilarityOptions::new();
    let jaccard = |a: &[i32], b: &[i32]| similarity_of_sets(a, b, Algorithm::Jaccard, &options);
    assert_eq!(jaccard(&C1, &C2).unwrap(), 1.0);
    assert_eq!(jaccard(&C1, &C3).unwrap(), 0.7272727272727273);
    assert_eq!(jaccard(&C1, &C4).unwrap(), 0.6363636363636364);
}

#[test]
fn test_exact_strings() {
    let options = trigram_options();
    assert_eq!(
        similarity_of_strings(S1, S2, Algorithm::Jaccard, &options).unwrap(),
        1.0
    );
    assert_eq!(
        similarity_of_strings(S1, S3, Algorithm::Jaccard, &options).unwrap(),
        0.6825396825396826
    );
}

#[test]
fn test_self_similarity() {
    // Unseeded on purpose: identical inputs agree whatever the coefficients.
    for algorithm in ALGORITHMS {
        let options = trigram_options();
        assert_eq!(
            similarity_of_strings(S3, S3, algorithm, &options).unwrap(),
            1.0,
            "{algorithm}"
        );
        assert_eq!(
            similarity_of_sets(&C3, &C3, algorithm, &options).unwrap(),
            1.0,
            "{algorithm}"
        );
    }
}

#[test]
fn test_symmetry() {
    for algorithm in ALGORITHMS {
        let similarity = Similarity::new(algorithm, trigram_options().with_seed(11)).unwrap();
        assert_eq!(
            similarity.of_strings(S1, S3).unwrap(),
            similarity.of_strings(S3, S1).unwrap(),
            "{algorithm}"
        );
        assert_eq!(
            similarity.of_sets(&C1[..], &C4[..]).unwrap(),
            similarity.of_sets(&C4[..], &C1[..]).unwrap(),
            "{algorithm}"
        );
    }
}

#[test]
fn test_idempotence() {
    for algorithm in ALGORITHMS {
        let similarity = Similarity::new(algorithm, trigram_options().with_seed(3)).unwrap();
        let first = similarity.of_strings(S1, S3).unwrap();
        assert_eq!(first, similarity.of_strings(S1, S3).unwrap(), "{algorithm}");
        let first = similarity.of_sets(&C1[..], &C3[..]).unwrap();
        assert_eq!(first, similarity.of_sets(&C1[..], &C3[..]).unwrap(), "{algorithm}");
    }
}

#[test]
fn test_lsh_is_zero_or_exact() {
    let options = trigram_options();
    for seed in 0..20 {
        let options = options.clone().with_seed(seed);
        for (a, b) in [(&C1[..], &C3[..]), (&C1[..], &C4[..]), (&C3[..], &C4[..])] {
            let exact = similarity_of_sets(a, b, Algorithm::Jaccard, &options).unwrap();
            let lsh = similarity_of_sets(a, b, Algorithm::Lsh, &options).unwrap();
            assert!(lsh == 0. || lsh == exact, "seed={seed} lsh={lsh} exact={exact}");
        }
    }
    let exact = similarity_of_strings(S1, S3, Algorithm::Jaccard, &options).unwrap();
    let lsh = similarity_of_strings(S1, S3, Algorithm::Lsh, &options).unwrap();
    assert!(lsh == 0. || lsh == exact);
}

#[test]
fn test_empty_union() {
    let empty: Vec<u32> = vec![];
    for algorithm in ALGORITHMS {
        let score = similarity_of_sets(&empty, &empty, algorithm, &SimilarityOptions::new());
        assert_eq!(score.unwrap(), 1.0, "{algorithm}");
    }
}

#[test]
fn test_minhash_sets() {
    // A single draw of 200 functions is noisy over a universe of 11 elements,
    // so the estimate is averaged over several seeds.
    let mean = mean_minhash_sets(&C1, &C3);
    assert!((mean - 0.495).abs() <= 0.2, "mean={mean}");
}

fn mean_minhash_sets(a: &[i32], b: &[i32]) -> f64 {
    let num_seeds = 10;
    let mut sum = 0.;
    for seed in 0..num_seeds {
        let options = SimilarityOptions::new()
            .with_signature_size(200)
            .with_seed(seed);
        sum += similarity_of_sets(a, b, Algorithm::MinHash, &options).unwrap();
    }
    sum / num_seeds as f64
}

#[test]
fn test_minhash_sets_near_duplicates() {
    let mean = mean_minhash_sets(&C1, &C4);
    assert!((mean - 0.705).abs() <= 0.2, "mean={mean}");
}

#[test]
fn test_minhash_strings() {
    let options = trigram_options().with_signature_size(200);
    let score = similarity_of_strings(S1, S3, Algorithm::MinHash, &options).unwrap();
    assert!((score - 0.535).abs() <= 0.2, "score={score}");
    let score = similarity_of_strings(S1, S4, Algorithm::MinHash, &options).unwrap();
    assert!((score - 0.925).abs() <= 0.2, "score={score}");
}

#[test]
fn test_minhash_strings_all_hash_methods() {
    let methods = [
        HashMethod::Murmur3,
        HashMethod::Murmur3KirschMitzenmacher,
        HashMethod::City64,
        HashMethod::Farm64,
        HashMethod::Xx64,
    ];
    for method in methods {
        let options = trigram_options()
            .with_signature_size(200)
            .with_hash_method(method);
        let score = similarity_of_strings(S1, S4, Algorithm::MinHash, &options).unwrap();
        assert!((score - 0.925).abs() <= 0.2, "{method}: score={score}");
    }
}

#[test]
fn test_invalid_options() {
    let invalid = [
        SimilarityOptions::new().with_shingle_length(0),
        SimilarityOptions::new().with_universe_size(1),
        SimilarityOptions::new().with_band_count(0),
    ];
    for options in invalid {
        for algorithm in ALGORITHMS {
            let err = Similarity::new(algorithm, options.clone()).unwrap_err();
            assert!(err.to_string().starts_with("InputError:"), "{err}");
        }
    }
}
