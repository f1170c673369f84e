//! Logger 注册表与日志组合流程的集成测试
//!
//! 通过公开的 SinkFactory 接口注入记录型 sink，观察每个 sink 实际收到的内容

#[cfg(test)]
mod log_registry_tests {
    use logx::log::{
        ConfigError, ConfigModel, HandlerSpec, Label, LogLevel, Logger, LoggerRegistry, LoggerSpec,
        Sink, SinkFactory,
    };
    use std::collections::HashMap;
    use std::fmt;
    use std::str::FromStr;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct Event {
        handler: String,
        level: LogLevel,
        message: String,
        labels: Vec<(String, String)>,
    }

    /// 所有 handler 共用一个事件列表，便于检查投递顺序
    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<Event>>,
        builds: Mutex<HashMap<String, usize>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        fn clear(&self) {
            self.events.lock().unwrap().clear();
        }
    }

    struct RecorderSink {
        handler: String,
        recorder: Arc<Recorder>,
    }

    impl Sink for RecorderSink {
        fn emit(&self, level: LogLevel, message: &str, labels: &[Label]) {
            self.recorder.events.lock().unwrap().push(Event {
                handler: self.handler.clone(),
                level,
                message: message.to_string(),
                labels: labels
                    .iter()
                    .map(|l| (l.key().to_string(), l.value().to_string()))
                    .collect(),
            });
        }
    }

    struct RecorderFactory(Arc<Recorder>);

    impl SinkFactory for RecorderFactory {
        fn build(&self, name: &str, spec: &HandlerSpec) -> Result<Arc<dyn Sink>, ConfigError> {
            LogLevel::from_str(&spec.level).map_err(|_| ConfigError::InvalidHandlerLevel {
                handler: name.to_string(),
                level: spec.level.clone(),
            })?;
            *self.0.builds.lock().unwrap().entry(name.to_string()).or_default() += 1;
            Ok(Arc::new(RecorderSink {
                handler: name.to_string(),
                recorder: Arc::clone(&self.0),
            }))
        }
    }

    struct Explode;

    impl fmt::Display for Explode {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            panic!("suppressed message must not be formatted")
        }
    }

    fn handler() -> HandlerSpec {
        HandlerSpec {
            level: "debug".to_string(),
            output_paths: vec!["stdout".to_string()],
            ..Default::default()
        }
    }

    fn logger_spec(level: &str, handlers: &[&str]) -> LoggerSpec {
        LoggerSpec {
            name: None,
            level: level.to_string(),
            handlers: handlers.iter().map(|h| h.to_string()).collect(),
        }
    }

    fn config() -> ConfigModel {
        let mut config = ConfigModel::default();
        config.handlers.insert("h".to_string(), handler());
        config.handlers.insert("audit".to_string(), handler());
        config
            .loggers
            .insert("root".to_string(), logger_spec("info", &["h"]));
        config
            .loggers
            .insert("controller".to_string(), logger_spec("warn", &["h", "audit"]));
        config
    }

    fn setup() -> (LoggerRegistry, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let registry = LoggerRegistry::with_factory(Arc::new(RecorderFactory(recorder.clone())));
        registry.initialize(&config()).unwrap();
        (registry, recorder)
    }

    fn keys(event: &Event) -> Vec<&str> {
        event.labels.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn test_hierarchical_fallback() {
        let (registry, _) = setup();
        let controller = registry.lookup("controller");
        let deep = registry.lookup("controller.something.deep");

        assert_eq!(deep.name(), "controller.something.deep");
        assert_eq!(deep.level(), controller.level());
        assert_eq!(deep.sink_names(), controller.sink_names());
        for (name, sink) in deep.sinks() {
            assert!(Arc::ptr_eq(sink, &controller.sinks()[name]));
        }
    }

    #[test]
    fn test_unconfigured_top_level_name_falls_back_to_root() {
        let (registry, _) = setup();
        let logger = registry.lookup("worker");
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.sink_names(), vec!["h"]);
    }

    #[test]
    fn test_caching_idempotence() {
        let (registry, _) = setup();
        let first = registry.lookup("a.b.c");
        let second = registry.lookup("a.b.c");

        assert_eq!(first.name(), second.name());
        assert_eq!(first.level(), second.level());
        assert_eq!(first.sink_names(), second.sink_names());
    }

    #[test]
    fn test_level_gating() {
        let (registry, recorder) = setup();
        let logger = registry.lookup("controller.gate");

        logger.debug("d");
        logger.info("i");
        logger.warn("w");
        logger.error("e");

        let delivered: Vec<(String, LogLevel)> = recorder
            .events()
            .into_iter()
            .map(|e| (e.handler, e.level))
            .collect();
        assert_eq!(
            delivered,
            vec![
                ("audit".to_string(), LogLevel::Warning),
                ("h".to_string(), LogLevel::Warning),
                ("audit".to_string(), LogLevel::Error),
                ("h".to_string(), LogLevel::Error),
            ]
        );
    }

    #[test]
    fn test_level_change_with_fixed_sinks() {
        for level in ["error", "warn", "info", "debug"] {
            let recorder = Arc::new(Recorder::default());
            let registry = LoggerRegistry::with_factory(Arc::new(RecorderFactory(recorder.clone())));
            let mut config = config();
            config.loggers.get_mut("root").unwrap().level = level.to_string();
            registry.initialize(&config).unwrap();

            let logger = registry.lookup("x");
            for event_level in LogLevel::EMITTABLE {
                logger.log(event_level, &[], "m");
            }

            let threshold = LogLevel::from_str(level).unwrap();
            let delivered: Vec<LogLevel> = recorder.events().iter().map(|e| e.level).collect();
            let expected: Vec<LogLevel> = LogLevel::EMITTABLE
                .into_iter()
                .filter(|l| *l <= threshold)
                .collect();
            assert_eq!(delivered, expected, "threshold {}", level);
        }
    }

    #[test]
    fn test_formatting_suppression() {
        let (registry, recorder) = setup();
        let logger = registry.lookup("controller.quiet");

        logger.info(Explode);
        logger.debug(format_args!("{} {}", Explode, 1));
        logger.with_label(Label::int("n", 1)).info(Explode);
        logger.with_labels(vec![Label::int("n", 1)]).debug(Explode);

        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_label_precedence() {
        let (registry, recorder) = setup();
        registry.set_global_labels(vec![Label::int("a", 1)]);
        let logger = registry.lookup("svc");

        logger
            .with_labels(vec![Label::int("b", 2)])
            .with_label(Label::int("c", 3))
            .info("m");

        let events = recorder.events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].labels,
            vec![
                ("logger".to_string(), "svc".to_string()),
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
                ("c".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicate_keys_pass_through() {
        let (registry, recorder) = setup();
        registry.set_global_labels(vec![Label::string("env", "global")]);

        registry
            .lookup("svc")
            .with_label(Label::string("env", "local"))
            .info("m");

        let events = recorder.events();
        assert_eq!(keys(&events[0]), vec!["logger", "env", "env"]);
        assert_eq!(events[0].labels[2].1, "local");
    }

    #[test]
    fn test_builder_independence() {
        let (registry, recorder) = setup();
        let logger = registry.lookup("svc");
        let event = logger.with_label(Label::string("base", "1"));

        let x = event.with_label(Label::string("x", "1"));
        let y = event.with_label(Label::string("y", "1"));
        y.info("y");
        x.info("x");

        let events = recorder.events();
        assert_eq!(keys(&events[0]), vec!["logger", "base", "y"]);
        assert_eq!(keys(&events[1]), vec!["logger", "base", "x"]);
    }

    #[test]
    fn test_config_round_trip_and_missing_root() {
        let (registry, recorder) = setup();
        let mut config = ConfigModel::default();
        config.handlers.insert(
            "h".to_string(),
            HandlerSpec {
                level: "info".to_string(),
                encoding: "json".to_string(),
                output_paths: vec!["stdout".to_string()],
                ..Default::default()
            },
        );
        config
            .loggers
            .insert("root".to_string(), logger_spec("info", &["h"]));
        config
            .loggers
            .insert("svc".to_string(), logger_spec("info", &["h"]));
        registry.initialize(&config).unwrap();
        assert_eq!(registry.names(), vec!["root", "svc"]);

        config.loggers.remove("root");
        let err = registry.initialize(&config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRoot));
        assert_eq!(registry.names(), vec!["root", "svc"]);

        recorder.clear();
        registry.lookup("svc").info("still works");
        assert_eq!(recorder.events().len(), 1);
    }

    #[test]
    fn test_unknown_handler_reference() {
        let (registry, _) = setup();
        let mut config = config();
        config
            .loggers
            .insert("svc".to_string(), logger_spec("info", &["h", "nope"]));

        let err = registry.initialize(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownHandler { ref logger, ref handler } if logger == "svc" && handler == "nope"
        ));
        assert!(err.to_string().contains("/loggers/svc"));
        assert!(!registry.contains("svc"));
    }

    #[test]
    fn test_silent_logger() {
        let (registry, recorder) = setup();
        let mut config = config();
        config
            .loggers
            .insert("off".to_string(), logger_spec("none", &["h"]));
        config.loggers.insert("orphan".to_string(), logger_spec("debug", &[]));
        registry.initialize(&config).unwrap();

        for name in ["off", "orphan.child"] {
            let logger: Arc<Logger> = registry.lookup(name);
            assert!(logger.is_silent(), "{}", name);
            for level in LogLevel::EMITTABLE {
                logger.log(level, &[], Explode);
                logger.with_label(Label::int("n", 1)).log(level, Explode);
            }
            logger.log(LogLevel::None, &[], "unknown");
        }

        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_unknown_level_surfaces_as_warning() {
        let (registry, recorder) = setup();
        let logger = registry.lookup("controller.odd");

        logger.log(LogLevel::None, &[], "strange");

        let events = recorder.events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.level == LogLevel::Warning));
        assert!(events[0].message.contains("unknown log level"));
        assert!(events[0].message.ends_with("strange"));
    }

    #[test]
    fn test_global_labels_apply_to_existing_loggers() {
        let (registry, recorder) = setup();
        let logger = registry.lookup("svc");

        registry.set_global_labels(vec![Label::string("region", "eu")]);
        logger.info("m");

        assert_eq!(keys(&recorder.events()[0]), vec!["logger", "region"]);
        assert_eq!(registry.get_global_labels(), vec![Label::string("region", "eu")]);
    }

    #[test]
    fn test_sinks_built_once_per_initialize() {
        let (registry, recorder) = setup();
        registry.lookup("a.b");
        registry.lookup("controller.c.d");

        let builds = recorder.builds.lock().unwrap().clone();
        assert_eq!(builds["h"], 1);
        assert_eq!(builds["audit"], 1);
    }

    #[test]
    fn test_concurrent_lookup_and_log() {
        let (registry, recorder) = setup();
        let registry = Arc::new(registry);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for j in 0..50 {
                        let logger = registry.lookup(&format!("pool.worker{}.task{}", i, j % 5));
                        logger.with_label(Label::int("j", j)).info("tick");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(recorder.events().len(), 8 * 50);
        assert!(registry.contains("pool"));
        for i in 0..8 {
            assert!(registry.contains(&format!("pool.worker{}", i)));
        }
    }
}
