use chainrouter::candidates::Candidates;
use chainrouter::config::RouterConfig;
use std::env;

// All CHAINROUTER_* variables are handled by this one test so parallel test
// threads never race on the process environment.
#[test]
fn test_config_from_env_round_trip() {
    env::set_var("CHAINROUTER_LOCALES", "en, de ,fr");
    env::set_var("CHAINROUTER_CANDIDATE_LIMIT", "5");
    env::set_var("CHAINROUTER_DEFAULT_LOCALE", "de");
    env::set_var("CHAINROUTER_PAGE_SIZE", "25");

    let config = RouterConfig::from_env();
    assert_eq!(config.locales, vec!["en", "de", "fr"]);
    assert_eq!(config.candidate_limit, 5);
    assert_eq!(config.default_locale.as_deref(), Some("de"));
    assert_eq!(config.page_size, 25);

    // the candidate generator picks the parsed locales up
    let candidates = Candidates::from_config(&config);
    assert_eq!(
        candidates.candidates("/de/impressum"),
        vec!["/de/impressum", "/de", "/", "/impressum"]
    );

    // unparseable and zero values fall back to defaults
    env::set_var("CHAINROUTER_CANDIDATE_LIMIT", "many");
    env::set_var("CHAINROUTER_PAGE_SIZE", "0");
    env::set_var("CHAINROUTER_DEFAULT_LOCALE", "");
    let config = RouterConfig::from_env();
    assert_eq!(config.candidate_limit, 20);
    assert_eq!(config.page_size, 50);
    assert_eq!(config.default_locale, None);

    env::remove_var("CHAINROUTER_LOCALES");
    env::remove_var("CHAINROUTER_CANDIDATE_LIMIT");
    env::remove_var("CHAINROUTER_DEFAULT_LOCALE");
    env::remove_var("CHAINROUTER_PAGE_SIZE");

    let config = RouterConfig::from_env();
    assert!(config.locales.is_empty());
    assert_eq!(config.candidate_limit, 20);
    assert_eq!(config.default_locale, None);
    assert_eq!(config.page_size, 50);
}
