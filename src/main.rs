#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod config;
mod core;
mod prelude;
mod quantity;
mod report;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, BatteryArgs, Command, OutputFormat, ReportArgs},
    core::regime::OperatingRegime,
    prelude::*,
    report::Report,
    tables::{
        build_catalogue_table,
        build_discharge_table,
        build_machines_table,
        build_summary_table,
    },
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Report(args) => report(&args)?,
        Command::Catalogue(args) => {
            println!("{}", build_catalogue_table(&args.load()?));
        }
        Command::Battery(args) => battery(&args)?,
    }

    info!("done!");
    Ok(())
}

fn report(args: &ReportArgs) -> Result {
    let configuration = args.dataset.load()?;
    let mut vessel = configuration.vessel(args.propulsion_regime, None, args.clock())?;
    vessel.set_regime(args.operating_regime)?;
    if let Some(rpm) = args.rpm {
        if args.operating_regime == OperatingRegime::Consuming {
            warn!(%rpm, "the eco motor runs at its fixed RPM, ignoring");
        } else {
            vessel.set_operating_rpm(rpm)?;
        }
    }

    let report = Report::try_from_vessel(&vessel, &configuration.revision, args.distance)
        .context("failed to estimate the vessel state")?;
    match args.format {
        OutputFormat::Table => {
            println!("{}", build_machines_table(&report));
            println!("{}", build_summary_table(&report));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn battery(args: &BatteryArgs) -> Result {
    let battery = args.dataset.load()?.battery_model()?;
    println!("{}", build_discharge_table(&battery, args.current));
    if let Some(current) = args.current {
        let endurance = battery.endurance(current)?;
        info!(%current, %endurance, "estimated");
    }
    Ok(())
}
