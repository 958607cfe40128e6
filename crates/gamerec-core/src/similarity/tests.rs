#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests {
    use crate::item::{Bucket, CombinedItem, DiscretizedItem};
    use crate::similarity::{
        strategy_for, CosineStrategy, JaccardStrategy, Metric, SimilarityMatrix,
        SimilarityStrategy, Vocabulary,
    };

    fn combined(id: &str, combined: &str) -> CombinedItem {
        CombinedItem {
            item: DiscretizedItem {
                id: id.to_string(),
                genres: Default::default(),
                tags: Default::default(),
                quality: Bucket::Unknown,
                popularity: Bucket::Unknown,
            },
            combined: combined.to_string(),
        }
    }

    fn catalog() -> Vec<CombinedItem> {
        vec![
            combined("Skyrim", "rpg openworld fantasy singleplayer"),
            combined("Witcher 3", "rpg openworld fantasy story"),
            combined("Portal 2", "puzzle coop firstperson"),
            combined("Fallout 4", "rpg openworld postapocalyptic singleplayer"),
            combined("Tetris", "puzzle"),
        ]
    }

    fn assert_well_formed(matrix: &SimilarityMatrix, size: usize) {
        assert_eq!(matrix.size(), size);
        assert!(matrix.is_symmetric(), "matrix should be symmetric");
        for i in 0..size {
            assert_eq!(matrix.get(i, i), 1.0, "self-similarity of item {}", i);
            for &score in matrix.row(i) {
                assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
            }
        }
    }

    #[test]
    fn test_jaccard_scenario() {
        let items = vec![
            combined("A", "rpg openworld"),
            combined("B", "rpg action"),
            combined("C", "puzzle"),
        ];

        let matrix = JaccardStrategy::new(false).compute_matrix(&items);

        assert_well_formed(&matrix, 3);
        assert!((matrix.get(0, 1) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(matrix.get(0, 2), 0.0);
        assert_eq!(matrix.get(1, 2), 0.0);
    }

    #[test]
    fn test_cosine_matrix_well_formed() {
        let items = catalog();
        let matrix = CosineStrategy::new(false).compute_matrix(&items);

        assert_well_formed(&matrix, items.len());
        // Skyrim and Fallout 4 share 3 of 4 terms: 3 / (2 * 2)
        assert!((matrix.get(0, 3) - 0.75).abs() < 1e-12);
        assert_eq!(matrix.get(0, 2), 0.0);
    }

    #[test]
    fn test_cosine_counts_repeated_tokens() {
        let items = vec![combined("A", "rpg rpg action"), combined("B", "rpg")];
        let matrix = CosineStrategy::new(false).compute_matrix(&items);

        // a = (action 1, rpg 2), b = (rpg 1): 2 / sqrt(5)
        assert!((matrix.get(0, 1) - 2.0 / 5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_jaccard_matrix_well_formed() {
        let items = catalog();
        let matrix = JaccardStrategy::new(false).compute_matrix(&items);

        assert_well_formed(&matrix, items.len());
        // Skyrim vs Fallout 4: 3 shared of 5 distinct
        assert!((matrix.get(0, 3) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let items = catalog();
        for metric in Metric::ALL {
            let sequential = strategy_for(metric, false).compute_matrix(&items);
            let parallel = strategy_for(metric, true).compute_matrix(&items);
            assert_eq!(sequential, parallel, "{} matrices differ", metric);
        }
    }

    #[test]
    fn test_strategy_for_metric() {
        assert_eq!(strategy_for(Metric::Cosine, true).metric(), Metric::Cosine);
        assert_eq!(strategy_for(Metric::Jaccard, true).metric(), Metric::Jaccard);
    }

    #[test]
    fn test_empty_attribute_set_scores_zero() {
        let items = vec![combined("A", "rpg"), combined("Broken", "")];

        for metric in Metric::ALL {
            let matrix = strategy_for(metric, false).compute_matrix(&items);
            assert_eq!(matrix.get(0, 1), 0.0);
            assert_eq!(matrix.get(1, 1), 0.0);
            assert_eq!(matrix.get(0, 0), 1.0);
        }
    }

    #[test]
    fn test_empty_catalog() {
        let matrix = CosineStrategy::new(true).compute_matrix(&[]);
        assert!(matrix.is_empty());
        assert_eq!(matrix.rows().count(), 0);
    }

    #[test]
    fn test_vocabulary_build() {
        let items = vec![combined("A", "rpg action"), combined("B", "action puzzle")];
        let vocabulary = Vocabulary::build(&items);

        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.index_of("action"), Some(0));
        assert_eq!(vocabulary.index_of("puzzle"), Some(1));
        assert_eq!(vocabulary.index_of("rpg"), Some(2));
    }

    #[test]
    fn test_matrix_from_rows() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
        assert_eq!(matrix.row(1), &[0.5, 1.0]);
        assert_eq!(matrix.rows().count(), 2);

        assert!(SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5]]).is_err());
        assert!(SimilarityMatrix::from_rows(vec![vec![1.0, 0.5]]).is_err());
    }

    #[test]
    fn test_metric_parse_and_display() {
        assert_eq!("cosine".parse::<Metric>().unwrap(), Metric::Cosine);
        assert_eq!("Jaccard".parse::<Metric>().unwrap(), Metric::Jaccard);
        assert!("euclidean".parse::<Metric>().is_err());
        assert_eq!(Metric::Jaccard.to_string(), "jaccard");
        assert_eq!(Metric::Cosine.stage_name(), "cosine similarity");
    }
}
