use super::*;
use crate::config::ThreadingConfig;

fn sequential_config() -> RenderConfig {
    RenderConfig {
        cover_base_url: None,
        threading: ThreadingConfig {
            parallel: false,
            threads: None,
        },
        ..RenderConfig::default()
    }
}

#[test]
fn build_thread_pool_rejects_zero_threads() {
    let err = build_thread_pool(Some(0)).unwrap_err();
    assert!(err.to_string().contains("config error:"));
}

#[test]
fn sequential_context_has_no_pool() {
    let ctx = RenderContext::new(
        sequential_config(),
        FontBook::empty(),
        AssetResolver::offline(std::env::temp_dir()),
    )
    .unwrap();
    assert!(!ctx.is_parallel());
    assert_eq!(ctx.join(|| 1, || "two"), (1, "two"));
    assert_eq!(ctx.install(|| 3), 3);
}

#[test]
fn parallel_context_runs_on_named_workers() {
    let mut config = sequential_config();
    config.threading = ThreadingConfig {
        parallel: true,
        threads: Some(2),
    };
    let ctx = RenderContext::new(
        config,
        FontBook::empty(),
        AssetResolver::offline(std::env::temp_dir()),
    )
    .unwrap();
    assert!(ctx.is_parallel());

    let name = ctx.install(|| std::thread::current().name().map(str::to_string));
    assert!(name.unwrap().starts_with("maisheet-"));
    assert_eq!(ctx.join(|| 1 + 1, || 2 * 2), (2, 4));
}

#[test]
fn from_config_reports_missing_fonts() {
    let mut config = sequential_config();
    config.resource_root = std::env::temp_dir().join("maisheet_no_such_resource_root");
    let err = RenderContext::from_config(config).unwrap_err();
    assert!(err.to_string().starts_with("font error:"), "{err}");
}
