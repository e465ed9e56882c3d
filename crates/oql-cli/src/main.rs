mod cli;
mod commands;
mod logging;

use cli::{
    AstParams, CheckParams, CompleteParams, HighlightParams, HoverParams, LintParams, build_cli,
};

fn main() {
    logging::init_logging();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("ast", m)) => {
            let params = AstParams::from_matches(m);
            commands::ast::run(params.into());
        }
        Some(("lint", m)) => {
            let params = LintParams::from_matches(m);
            commands::lint::run(params.into());
        }
        Some(("complete", m)) => {
            let params = CompleteParams::from_matches(m);
            commands::complete::run(params.into());
        }
        Some(("highlight", m)) => {
            let params = HighlightParams::from_matches(m);
            commands::highlight::run(params.into());
        }
        Some(("hover", m)) => {
            let params = HoverParams::from_matches(m);
            commands::hover::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
