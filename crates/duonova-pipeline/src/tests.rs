//! Flow tests for selection, fallback and the full pipeline

#[cfg(test)]
mod tests {
    use crate::{
        AttemptFailure, CancelFlag, ExtractionInput, FallbackOrchestrator, Pipeline,
        PipelineError, ProcessingRequest, SelectionError, HEURISTIC_CONFIDENCE,
    };
    use duonova_domain::{
        DecisionSource, EducationEntry, ExperienceEntry, ExtractionMethod, FileType,
        PersonalInfo, ProcessingMode, ProcessingOutcome, ProviderId, ProviderSelection,
        RequestId, ResultSink, ResumeRecord, SkillSet,
    };
    use duonova_llm::{CallLog, CallPath, MockAdapter, MockCall, MockResponse, ProviderRegistry};
    use duonova_rules::{ConfigStore, ProcessingConfig};
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const RESUME_TEXT: &str = "Jane Doe\njane@example.com\nSKILLS\nRust, Go";

    fn call(provider: ProviderId, path: CallPath) -> MockCall {
        MockCall { provider, path }
    }

    fn complete_record() -> ResumeRecord {
        let mut skills = BTreeMap::new();
        skills.insert("programming_languages".to_string(), vec!["Rust".to_string()]);
        ResumeRecord {
            personal_info: Some(PersonalInfo {
                name: Some("Jane Doe".to_string()),
                ..PersonalInfo::default()
            }),
            skills: Some(SkillSet::Categorized(skills)),
            experience: vec![ExperienceEntry {
                company: Some("Acme".to_string()),
                position: Some("Engineer".to_string()),
                ..ExperienceEntry::default()
            }],
            education: vec![EducationEntry {
                institution: Some("MIT".to_string()),
                degree: Some("BSc".to_string()),
                ..EducationEntry::default()
            }],
            ..ResumeRecord::default()
        }
    }

    fn pipeline(registry: ProviderRegistry) -> Pipeline {
        let available = registry.providers();
        Pipeline::new(
            Arc::new(ConfigStore::new(ProcessingConfig::default())),
            registry,
            available,
        )
    }

    // Orchestrator

    #[tokio::test]
    async fn test_text_path_of_same_provider_before_next_provider() {
        let log = CallLog::new();
        let registry = ProviderRegistry::new()
            .with_adapter(
                MockAdapter::new(ProviderId::OpenAi)
                    .on_file(MockResponse::Fail("upload rejected".into()))
                    .with_log(log.clone()),
            )
            .with_adapter(MockAdapter::new(ProviderId::Anthropic).with_log(log.clone()));

        let input = ExtractionInput::new(FileType::Pdf)
            .with_bytes(b"%PDF")
            .with_text(RESUME_TEXT);
        let result = FallbackOrchestrator::new(&registry)
            .extract(
                &input,
                ProviderSelection::Auto,
                &[ProviderId::OpenAi, ProviderId::Anthropic],
                &CancelFlag::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.provider, Some(ProviderId::OpenAi));
        assert_eq!(result.method, Some(ExtractionMethod::TextExtraction));
        assert_eq!(
            log.calls(),
            vec![
                call(ProviderId::OpenAi, CallPath::File),
                call(ProviderId::OpenAi, CallPath::Text)
            ]
        );
    }

    #[tokio::test]
    async fn test_malformed_responses_advance_to_next_provider() {
        let log = CallLog::new();
        let registry = ProviderRegistry::new()
            .with_adapter(
                MockAdapter::new(ProviderId::Groq)
                    .text_only()
                    .on_text(MockResponse::Malformed("Sorry, I cannot help".into()))
                    .with_log(log.clone()),
            )
            .with_adapter(MockAdapter::new(ProviderId::OpenAi).with_log(log.clone()));

        let input = ExtractionInput::new(FileType::Docx).with_text(RESUME_TEXT);
        let result = FallbackOrchestrator::new(&registry)
            .extract(
                &input,
                ProviderSelection::Auto,
                &[ProviderId::Groq, ProviderId::OpenAi],
                &CancelFlag::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.provider, Some(ProviderId::OpenAi));
        // Text only: the text-only Groq mock never saw a file call
        assert_eq!(
            log.calls(),
            vec![
                call(ProviderId::Groq, CallPath::Text),
                call(ProviderId::OpenAi, CallPath::Text)
            ]
        );
    }

    #[tokio::test]
    async fn test_all_fail_with_text_uses_heuristic() {
        let registry = ProviderRegistry::new()
            .with_adapter(MockAdapter::new(ProviderId::OpenAi).on_both(MockResponse::Fail("down".into())))
            .with_adapter(MockAdapter::new(ProviderId::Groq).on_both(MockResponse::Fail("down".into())));

        let input = ExtractionInput::new(FileType::Pdf)
            .with_bytes(b"%PDF")
            .with_text(RESUME_TEXT);
        let result = FallbackOrchestrator::new(&registry)
            .extract(
                &input,
                ProviderSelection::Auto,
                &[ProviderId::OpenAi, ProviderId::Groq],
                &CancelFlag::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.confidence.value(), HEURISTIC_CONFIDENCE);
        assert_eq!(result.method, Some(ExtractionMethod::Heuristic));
        assert!(result.provider.is_none());
        assert_eq!(
            result.record.personal_info.and_then(|info| info.email),
            Some("jane@example.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_all_fail_without_text_is_exhausted() {
        let registry = ProviderRegistry::new()
            .with_adapter(
                MockAdapter::new(ProviderId::OpenAi)
                    .on_file(MockResponse::Malformed("{\"error\": \"bad\"}".into())),
            )
            .with_adapter(MockAdapter::new(ProviderId::Anthropic).on_file(MockResponse::Fail("down".into())));

        let input = ExtractionInput::new(FileType::Pdf).with_bytes(b"%PDF");
        let error = FallbackOrchestrator::new(&registry)
            .extract(
                &input,
                ProviderSelection::Auto,
                &[ProviderId::OpenAi, ProviderId::Anthropic],
                &CancelFlag::new(),
            )
            .await
            .unwrap_err();

        match error {
            PipelineError::AllProvidersExhausted { attempts } => {
                assert_eq!(attempts.len(), 2);
                assert_eq!(
                    attempts[0],
                    AttemptFailure {
                        provider: ProviderId::OpenAi,
                        method: ExtractionMethod::DirectFile,
                        error: attempts[0].error.clone(),
                        raw_payload: Some("{\"error\": \"bad\"}".to_string()),
                    }
                );
                assert_eq!(attempts[1].provider, ProviderId::Anthropic);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_disabled_fallback_tries_first_provider_only() {
        let log = CallLog::new();
        let registry = ProviderRegistry::new()
            .with_adapter(
                MockAdapter::new(ProviderId::Groq)
                    .text_only()
                    .on_text(MockResponse::Fail("rate limited".into()))
                    .with_log(log.clone()),
            )
            .with_adapter(MockAdapter::new(ProviderId::OpenAi).with_log(log.clone()));

        let input = ExtractionInput::new(FileType::Docx).with_text(RESUME_TEXT);
        let result = FallbackOrchestrator::new(&registry)
            .with_auto_fallback(false)
            .extract(
                &input,
                ProviderSelection::Auto,
                &[ProviderId::Groq, ProviderId::OpenAi],
                &CancelFlag::new(),
            )
            .await
            .unwrap();

        assert_eq!(log.calls(), vec![call(ProviderId::Groq, CallPath::Text)]);
        assert_eq!(result.method, Some(ExtractionMethod::Heuristic));
    }

    #[tokio::test]
    async fn test_timeout_counts_as_failure() {
        let registry = ProviderRegistry::new()
            .with_adapter(MockAdapter::new(ProviderId::OpenAi).on_file(MockResponse::Hang));

        let input = ExtractionInput::new(FileType::Pdf)
            .with_bytes(b"%PDF")
            .with_text(RESUME_TEXT);
        let result = FallbackOrchestrator::new(&registry)
            .with_call_timeout(Duration::from_millis(50))
            .extract(
                &input,
                ProviderSelection::Auto,
                &[ProviderId::OpenAi],
                &CancelFlag::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.method, Some(ExtractionMethod::TextExtraction));
        assert_eq!(result.provider, Some(ProviderId::OpenAi));
    }

    #[tokio::test]
    async fn test_cancelled_before_first_attempt() {
        let log = CallLog::new();
        let registry = ProviderRegistry::new()
            .with_adapter(MockAdapter::new(ProviderId::OpenAi).with_log(log.clone()));
        let cancel = CancelFlag::new();
        cancel.cancel();

        let input = ExtractionInput::new(FileType::Pdf).with_text(RESUME_TEXT);
        let result = FallbackOrchestrator::new(&registry)
            .extract(&input, ProviderSelection::Auto, &[ProviderId::OpenAi], &cancel)
            .await;

        assert!(matches!(result, Err(PipelineError::Cancelled)));
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_specific_provider_failure_is_error_marked() {
        let log = CallLog::new();
        let registry = ProviderRegistry::new()
            .with_adapter(
                MockAdapter::new(ProviderId::Anthropic)
                    .on_both(MockResponse::Fail("overloaded".into()))
                    .with_log(log.clone()),
            )
            .with_adapter(MockAdapter::new(ProviderId::OpenAi).with_log(log.clone()));

        let input = ExtractionInput::new(FileType::Pdf)
            .with_bytes(b"%PDF")
            .with_text(RESUME_TEXT);
        let result = FallbackOrchestrator::new(&registry)
            .extract(
                &input,
                ProviderSelection::Specific(ProviderId::Anthropic),
                &[ProviderId::Anthropic, ProviderId::OpenAi],
                &CancelFlag::new(),
            )
            .await
            .unwrap();

        assert!(result.is_error());
        assert_eq!(result.provider, Some(ProviderId::Anthropic));
        assert!(log.calls().iter().all(|c| c.provider == ProviderId::Anthropic));
        assert_eq!(log.len(), 2);
    }

    #[tokio::test]
    async fn test_specific_unregistered_provider() {
        let registry = ProviderRegistry::new();
        let input = ExtractionInput::new(FileType::Pdf).with_text(RESUME_TEXT);
        let result = FallbackOrchestrator::new(&registry)
            .extract(
                &input,
                ProviderSelection::Specific(ProviderId::Groq),
                &[],
                &CancelFlag::new(),
            )
            .await
            .unwrap();

        assert!(result.is_error());
        assert!(result.error.unwrap().message.contains("not available"));
    }

    // Pipeline

    #[tokio::test]
    async fn test_large_pdf_goes_complete() {
        let log = CallLog::new();
        let registry = ProviderRegistry::new()
            .with_adapter(MockAdapter::new(ProviderId::Groq).text_only().with_log(log.clone()))
            .with_adapter(MockAdapter::new(ProviderId::OpenAi).with_log(log.clone()));

        let mut bytes = b"%PDF-1.7".to_vec();
        bytes.resize(6_000_000, 0);
        let outcome = pipeline(registry)
            .process(ProcessingRequest::from_bytes("resume.pdf", FileType::Pdf, bytes).with_text(RESUME_TEXT))
            .await
            .unwrap();

        assert_eq!(outcome.decision.mode, ProcessingMode::Complete);
        assert_eq!(outcome.decision.rule_name(), Some("large_files"));
        assert!(outcome.decision.reasoning.contains("large_files"));
        assert_eq!(outcome.result.provider, Some(ProviderId::OpenAi));
        assert_eq!(outcome.result.method, Some(ExtractionMethod::DirectFile));
        assert_eq!(log.calls(), vec![call(ProviderId::OpenAi, CallPath::File)]);
    }

    #[tokio::test]
    async fn test_explicit_hybrid_skips_rules() {
        let log = CallLog::new();
        let registry = ProviderRegistry::new()
            .with_adapter(MockAdapter::new(ProviderId::Groq).text_only().with_log(log.clone()))
            .with_adapter(MockAdapter::new(ProviderId::OpenAi).with_log(log.clone()));

        let request = ProcessingRequest::from_text("notes.txt", FileType::Docx, 50_000, RESUME_TEXT)
            .with_mode(ProcessingMode::Hybrid);
        let outcome = pipeline(registry).process(request).await.unwrap();

        assert_eq!(outcome.decision.mode, ProcessingMode::Hybrid);
        assert_eq!(outcome.decision.source, DecisionSource::ExplicitOverride);
        assert_eq!(outcome.result.provider, Some(ProviderId::Groq));
        assert_eq!(log.calls(), vec![call(ProviderId::Groq, CallPath::Text)]);
    }

    #[tokio::test]
    async fn test_hybrid_without_text_submits_document() {
        let log = CallLog::new();
        let registry = ProviderRegistry::new()
            .with_adapter(MockAdapter::new(ProviderId::Groq).text_only().with_log(log.clone()))
            .with_adapter(MockAdapter::new(ProviderId::OpenAi).with_log(log.clone()));

        // Not a real DOCX, so local extraction yields nothing
        let request = ProcessingRequest::from_bytes("cv.docx", FileType::Docx, b"garbage".to_vec());
        let outcome = pipeline(registry).process(request).await.unwrap();

        assert_eq!(outcome.decision.mode, ProcessingMode::Hybrid);
        assert_eq!(outcome.decision.provider, ProviderId::Groq);
        assert_eq!(outcome.result.provider, Some(ProviderId::OpenAi));
        assert_eq!(outcome.result.method, Some(ExtractionMethod::DirectFile));
        assert_eq!(log.calls(), vec![call(ProviderId::OpenAi, CallPath::File)]);
    }

    #[tokio::test]
    async fn test_email_backfilled_from_text() {
        let registry = ProviderRegistry::new().with_adapter(
            MockAdapter::new(ProviderId::Groq)
                .text_only()
                .on_text(MockResponse::Record(complete_record())),
        );

        let request = ProcessingRequest::from_text("cv.docx", FileType::Docx, 20_000, RESUME_TEXT);
        let outcome = pipeline(registry).process(request).await.unwrap();

        let info = outcome.result.record.personal_info.unwrap();
        assert_eq!(info.email.as_deref(), Some("jane@example.com"));
        assert!(outcome.validation.is_valid);
    }

    #[tokio::test]
    async fn test_heuristic_result_is_validated() {
        let registry = ProviderRegistry::new().with_adapter(
            MockAdapter::new(ProviderId::Groq)
                .text_only()
                .on_text(MockResponse::Fail("down".into())),
        );

        let request = ProcessingRequest::from_text("cv.docx", FileType::Docx, 20_000, RESUME_TEXT);
        let outcome = pipeline(registry).process(request).await.unwrap();

        assert_eq!(outcome.result.method, Some(ExtractionMethod::Heuristic));
        // No experience or education in the text
        assert!(!outcome.validation.is_valid);
        assert!(outcome
            .validation
            .missing_fields
            .contains(&"experience".to_string()));
    }

    #[tokio::test]
    async fn test_no_provider_available() {
        let request = ProcessingRequest::from_text("cv.pdf", FileType::Pdf, 20_000, RESUME_TEXT);
        let error = pipeline(ProviderRegistry::new()).process(request).await.unwrap_err();
        assert!(matches!(
            error,
            PipelineError::Selection(SelectionError::NoProviderAvailable)
        ));
    }

    #[tokio::test]
    async fn test_forced_provider_without_credentials_is_rejected() {
        let log = CallLog::new();
        let registry = ProviderRegistry::new()
            .with_adapter(MockAdapter::new(ProviderId::Groq).text_only().with_log(log.clone()))
            .with_adapter(MockAdapter::new(ProviderId::OpenAi).with_log(log.clone()));
        let pipeline = Pipeline::new(
            Arc::new(ConfigStore::new(ProcessingConfig::default())),
            registry,
            vec![ProviderId::Groq],
        );

        let request = ProcessingRequest::from_text("cv.docx", FileType::Docx, 40_000, RESUME_TEXT)
            .with_provider(ProviderSelection::Specific(ProviderId::OpenAi));
        let error = pipeline.process(request).await.unwrap_err();

        assert!(matches!(
            error,
            PipelineError::Selection(SelectionError::ProviderUnavailable(ProviderId::OpenAi))
        ));
        assert_eq!(error.to_string(), "Selection error: Provider 'openai' is not available");
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_forced_provider_is_reported_in_decision() {
        let log = CallLog::new();
        let registry = ProviderRegistry::new()
            .with_adapter(MockAdapter::new(ProviderId::Groq).text_only().with_log(log.clone()))
            .with_adapter(MockAdapter::new(ProviderId::OpenAi).with_log(log.clone()));

        let request = ProcessingRequest::from_text("cv.docx", FileType::Docx, 40_000, RESUME_TEXT)
            .with_provider(ProviderSelection::Specific(ProviderId::OpenAi));
        let outcome = pipeline(registry).process(request).await.unwrap();

        // The docx rule alone would pick Groq
        assert_eq!(outcome.decision.rule_name(), Some("docx_files"));
        assert_eq!(outcome.decision.provider, ProviderId::OpenAi);
        assert_eq!(outcome.result.provider, Some(ProviderId::OpenAi));
        assert_eq!(outcome.decision.provider_order, vec![ProviderId::OpenAi]);
        assert!(outcome.decision.cost_switch.is_none());
        assert!(outcome.decision.reasoning.contains(" | Provider override: "));
        assert!(log.calls().iter().all(|c| c.provider == ProviderId::OpenAi));
    }

    #[tokio::test]
    async fn test_admin_override_applies_to_next_request() {
        let registry = ProviderRegistry::new()
            .with_adapter(MockAdapter::new(ProviderId::Groq).text_only())
            .with_adapter(MockAdapter::new(ProviderId::OpenAi));
        let pipeline = pipeline(registry);

        let request = ProcessingRequest::from_text("cv.docx", FileType::Docx, 20_000, RESUME_TEXT);
        let before = pipeline.process(request.clone()).await.unwrap();
        assert_eq!(before.decision.mode, ProcessingMode::Hybrid);

        pipeline.store().force_mode(ProcessingMode::Complete);
        let after = pipeline.process(request).await.unwrap();
        assert_eq!(after.decision.mode, ProcessingMode::Complete);
        assert_eq!(after.decision.source, DecisionSource::ExplicitOverride);
    }

    #[derive(Clone, Default)]
    struct CollectingSink(Arc<Mutex<Vec<RequestId>>>);

    impl ResultSink for CollectingSink {
        type Error = String;

        fn publish(&self, id: &RequestId, _: &ProcessingOutcome) -> Result<(), Self::Error> {
            self.0.lock().unwrap().push(*id);
            Ok(())
        }
    }

    struct FailingSink;

    impl ResultSink for FailingSink {
        type Error = String;

        fn publish(&self, _: &RequestId, _: &ProcessingOutcome) -> Result<(), Self::Error> {
            Err("disk full".to_string())
        }
    }

    #[tokio::test]
    async fn test_sink_receives_correlation_id() {
        let registry = ProviderRegistry::new().with_adapter(MockAdapter::new(ProviderId::Groq).text_only());
        let sink = CollectingSink::default();
        let pipeline = pipeline(registry).with_sink(sink.clone());

        let id = RequestId::new();
        let request = ProcessingRequest::from_text("cv.docx", FileType::Docx, 20_000, RESUME_TEXT)
            .with_correlation_id(id);
        let outcome = pipeline.process(request).await.unwrap();

        assert_eq!(outcome.correlation_id, id);
        assert_eq!(*sink.0.lock().unwrap(), vec![id]);
    }

    #[tokio::test]
    async fn test_sink_failure_is_reported() {
        let registry = ProviderRegistry::new().with_adapter(MockAdapter::new(ProviderId::Groq).text_only());
        let pipeline = pipeline(registry).with_sink(FailingSink);

        let request = ProcessingRequest::from_text("cv.docx", FileType::Docx, 20_000, RESUME_TEXT);
        let error = pipeline.process(request).await.unwrap_err();
        assert!(matches!(error, PipelineError::Sink(message) if message == "disk full"));
    }
}
