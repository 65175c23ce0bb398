//! Offline route check against the configured route table.

use hoopstat_core::RouteGate;

use crate::cli::{GlobalOpts, RouteArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

#[allow(clippy::unnecessary_wraps)]
pub fn handle(args: &RouteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let gate = RouteGate::new(cfg.routes);
    let decision = gate.evaluate(&args.path, args.token.as_deref());

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &decision,
        |d| output::gate_decision(d, color),
        |d| d.location().unwrap_or("allow").to_owned(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
