use nexlog_core::{init_logging, init_logging_from_config, logging_status, TimelineConfig};

#[test]
fn init_is_idempotent_and_rejects_reconfiguration() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let first_dir = first.path().to_str().unwrap().to_string();
    let second_dir = second.path().to_str().unwrap().to_string();

    let config = TimelineConfig {
        log_level: "info".to_string(),
        log_dir: Some(first_dir.clone()),
        ..TimelineConfig::default()
    };
    assert!(init_logging_from_config(&config).unwrap());
    init_logging("INFO", &first_dir).unwrap();

    let level_err = init_logging("debug", &first_dir).unwrap_err();
    assert!(level_err.contains("refusing to switch"));
    let dir_err = init_logging("info", &second_dir).unwrap_err();
    assert!(dir_err.contains("refusing to switch"));

    let (level, dir) = logging_status().unwrap();
    assert_eq!(level, "info");
    assert_eq!(dir, first.path());

    let disabled = TimelineConfig::default();
    assert!(!init_logging_from_config(&disabled).unwrap());
}
