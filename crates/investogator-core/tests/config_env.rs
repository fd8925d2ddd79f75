//! 환경 변수 덮어쓰기 테스트.
//!
//! 프로세스 환경을 바꾸므로 이 파일에는 테스트를 하나만 둡니다.

use investogator_core::InvestogatorConfig;

#[test]
fn test_env_overrides_nested_keys() {
    std::env::set_var("INVESTOGATOR__ENGINE__CONCURRENCY", "4");
    std::env::set_var("INVESTOGATOR__HTTP__USER_AGENT", "test-agent");
    std::env::set_var("INVESTOGATOR__PROVIDERS__SUSTAINABILITY_EXCHANGE", "XNAS");
    // 접두사 구분자가 `__`가 아니면 설정 키로 취급하지 않음
    std::env::set_var("INVESTOGATOR_SUSTAINABILITY_TOKEN", "secret");
    std::env::set_var("INVESTOGATOR_CATALOG__DEFAULT_LIMIT", "3");

    let config = InvestogatorConfig::load("does/not/exist.toml").unwrap();

    assert_eq!(config.engine.concurrency, 4);
    assert_eq!(config.http.user_agent, "test-agent");
    assert_eq!(config.providers.sustainability_exchange, "XNAS");

    assert_eq!(config.catalog.default_limit, 25);
    assert_eq!(config.engine.call_timeout_secs, 10);
    assert!(!config.engine.parallel_providers);
    assert!(!format!("{:?}", config).contains("secret"));

    for var in [
        "INVESTOGATOR__ENGINE__CONCURRENCY",
        "INVESTOGATOR__HTTP__USER_AGENT",
        "INVESTOGATOR__PROVIDERS__SUSTAINABILITY_EXCHANGE",
        "INVESTOGATOR_SUSTAINABILITY_TOKEN",
        "INVESTOGATOR_CATALOG__DEFAULT_LIMIT",
    ] {
        std::env::remove_var(var);
    }
}
