use logx::log::{self, Label};

fn main() -> Result<(), log::ConfigError> {
    let config_path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/log-config.yaml");
    log::init_from_path(config_path)?;
    log::set_global_labels(vec![Label::string("app", "usage"), Label::int("pid", std::process::id() as i64)]);

    // 未配置的名称沿用最近祖先的配置
    let users = log::get_logger("controller.users");
    users.info("application started");
    users.debug(format_args!("loaded {} users", 42));

    users
        .with_labels(vec![Label::string("username", "alice"), Label::bool("admin", false)])
        .with_label(Label::float("latency_ms", 12.5))
        .warn("slow login");

    logx::error!(users, "user_id" => 7, "retry" => 3; "request failed: {}", "timeout");

    // root 为 info 级别，这条不会输出
    log::get_logger("worker").debug("never formatted");

    log::with("controller.audit").warn("permission changed");

    log::default_logger().info("from the default logger");

    log::global_registry().flush();
    Ok(())
}
