//! Cross-module tests for rules and configuration

#[cfg(test)]
mod tests {
    use crate::{ConfigStore, LayerValues, ProcessingConfig, ENV_DEFAULT_MODE};
    use duonova_domain::{FileMetadata, ProcessingMode};
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_snapshots_never_mix_updates() {
        let store = Arc::new(ConfigStore::default());

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..200 {
                    let (mode, priority) = if i % 2 == 0 {
                        ("complete", "openai,anthropic")
                    } else {
                        ("hybrid", "groq")
                    };
                    store.update(|config| {
                        config.overrides.default_mode = Some(mode.to_string());
                        config.overrides.provider_priority = Some(priority.to_string());
                    });
                }
            })
        };

        for _ in 0..200 {
            let snapshot = store.snapshot();
            match (
                snapshot.overrides.default_mode.as_deref(),
                snapshot.overrides.provider_priority.as_deref(),
            ) {
                (None, None) => {}
                (Some("complete"), Some("openai,anthropic")) => {}
                (Some("hybrid"), Some("groq")) => {}
                other => panic!("torn snapshot: {:?}", other),
            }
        }

        writer.join().unwrap();
    }

    #[test]
    fn test_environment_layer_marks_mode_explicit() {
        let config = ProcessingConfig::default()
            .with_environment(LayerValues::from_pairs([(ENV_DEFAULT_MODE, "complete")]));
        let resolved = config.resolve_defaults();
        assert_eq!(resolved.explicit_mode, Some(ProcessingMode::Complete));
    }

    proptest! {
        #[test]
        fn prop_size_threshold_boundaries(mb in 0u64..20) {
            let config = ProcessingConfig::default();
            let engine = config.rule_engine();
            let bytes = mb * 1024 * 1024;
            let rule = engine.evaluate("cv.docx", bytes);
            if mb > 5 {
                prop_assert_eq!(rule.map(|r| r.name.as_str()), Some("large_files"));
            } else {
                // Exactly 5 MB and below never trips the "> 5" rule
                prop_assert_eq!(rule.map(|r| r.name.as_str()), Some("docx_files"));
            }
        }

        #[test]
        fn prop_evaluation_is_deterministic(name in "[a-z]{1,8}\\.(pdf|docx|txt|rtf)", size in 0u64..12_000_000) {
            let config = ProcessingConfig::default();
            let first = config.rule_engine().evaluate(&name, size).map(|r| r.name.clone());
            let second = config.rule_engine().evaluate_file(&FileMetadata::new(name.clone(), size)).map(|r| r.name.clone());
            prop_assert_eq!(first, second);
        }
    }
}
