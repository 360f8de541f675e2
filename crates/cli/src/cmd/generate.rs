use crate::GenerateArgs;
use crate::logging;
use chrono::Local;
use liturgist_core::config::types::ResolvedConfig;
use liturgist_core::context::{build_context, build_context_for_date};
use liturgist_core::dates::next_sunday;
use liturgist_core::export::write_output;
use liturgist_core::fields::COLUMN_MAPPING;
use liturgist_core::schedule::load_schedule;
use liturgist_core::templates::load_template;
use std::fmt::Display;
use tracing::{debug, info};

pub fn run(cfg: &ResolvedConfig, args: GenerateArgs) {
    if args.template.is_none() && !args.print {
        eprintln!("You must specify a template file or --print.");
        eprintln!("usage: liturgist [--date M/D/YY] [--print] [--template <path>] [-o <path>] <schedule>");
        logging::flush();
        std::process::exit(2);
    }

    let Some(schedule_path) = args.schedule.as_deref() else {
        fail("a schedule path is required");
    };

    let schedule = match load_schedule(schedule_path) {
        Ok(s) => s,
        Err(e) => fail(format!("Error reading schedule: {e}")),
    };

    let built = match args.date.as_deref() {
        Some(date) => build_context(&schedule, date, COLUMN_MAPPING, &cfg.date_formats),
        None => {
            let sunday = next_sunday(Local::now().date_naive());
            debug!(%sunday, "no --date given, using next Sunday");
            build_context_for_date(&schedule, sunday, COLUMN_MAPPING, &cfg.date_formats)
        }
    };

    let ctx = match built {
        Ok(c) => c,
        Err(e) => fail(e),
    };

    if args.print {
        match serde_json::to_string_pretty(&ctx) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(e),
        }
    }

    let Some(template_path) = args.template.as_deref() else {
        return;
    };

    let template = match load_template(template_path) {
        Ok(t) => t,
        Err(e) => fail(e),
    };

    let rendered = match template.render(&ctx) {
        Ok(html) => html,
        Err(e) => fail(e),
    };
    let output = args.output.unwrap_or_else(|| cfg.output_path.clone());

    match write_output(&rendered, &output) {
        Ok(kind) => {
            info!(path = %output.display(), ?kind, "document written");
            println!("{} generated successfully", output.display());
        }
        Err(e) => fail(format!("Error generating: {e}")),
    }
}

fn fail(e: impl Display) -> ! {
    eprintln!("FAIL liturgist");
    eprintln!("{e}");
    logging::flush();
    std::process::exit(1);
}
