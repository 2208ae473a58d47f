//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use summit_config::SummitConfig;

#[test]
fn loads_event_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[event]
code = "SAN19"
sched_url = "https://summit2019.sched.com"
sched_api_key = "sched-key"
"#,
        )?;

        let config: SummitConfig = Figment::from(Serialized::defaults(SummitConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.event.code, "SAN19");
        assert_eq!(config.event.sched_url, "https://summit2019.sched.com");
        assert_eq!(config.event.sched_api_key, "sched-key");
        assert!(config.event.is_configured());
        Ok(())
    });
}

#[test]
fn loads_github_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[github]
repo_url = "git@github.com:acme/website.git"
owner = "acme"
repo = "website"
token = "gh-token"
reviewers = ["alice", "bob"]
default_branch = "main"
"#,
        )?;

        let config: SummitConfig = Figment::from(Serialized::defaults(SummitConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.github.owner, "acme");
        assert_eq!(config.github.reviewers, vec!["alice", "bob"]);
        assert_eq!(config.github.default_branch, "main");
        assert!(config.github.is_configured());
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up_by_figment_chain() {
    Jail::expect_with(|jail| {
        jail.create_dir(".summit")?;
        jail.create_file(
            ".summit/config.toml",
            r#"
[storage]
bucket = "static-assets"
cdn_url = "https://static.example.org"
"#,
        )?;

        let config: SummitConfig = SummitConfig::figment(&[]).extract()?;
        assert_eq!(config.storage.bucket, "static-assets");
        assert!(config.storage.is_configured());
        Ok(())
    });
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[event]
code = "BUD20"
"#,
        )?;

        let config: SummitConfig = Figment::from(Serialized::defaults(SummitConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.event.code, "BUD20");
        assert!(!config.event.is_configured());
        assert_eq!(config.media.responsive_widths, vec![300, 800, 1200]);
        assert_eq!(config.general.work_dir, "work_dir");
        Ok(())
    });
}
