use lavatop::prefs::{load_prefs_from, save_prefs_to, Preferences, Theme};

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let p = load_prefs_from(&dir.path().join("prefs.json"));
    assert_eq!(p, Preferences::default());
    assert_eq!(p.theme, Theme::Dark);
}

#[test]
fn saved_theme_is_loaded_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("prefs.json");
    let prefs = Preferences {
        theme: Theme::Dark.toggled(),
    };
    save_prefs_to(&path, &prefs).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"light\""), "{raw}");
    assert_eq!(load_prefs_from(&path).theme, Theme::Light);
}

#[test]
fn corrupt_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, "{ theme: ").unwrap();
    assert_eq!(load_prefs_from(&path), Preferences::default());

    std::fs::write(&path, r#"{"theme":"sepia"}"#).unwrap();
    assert_eq!(load_prefs_from(&path), Preferences::default());
}

#[test]
fn theme_names() {
    assert_eq!(Theme::Dark.name(), "dark");
    assert_eq!(Theme::Light.name(), "light");
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
}
