use lamp_control::command::{CommandDispatcher, ConsoleNotifier};
use lamp_control::connection::{ConnectionConfig, LampConnector};
use lamp_control::intent::LampIntent;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    lamp_control::init_tracing();

    let config = match ConnectionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("lampctl starting");
    info!("  Transport: {}", config.link.kind());
    info!("  Dialect: {}", config.dialect);

    let intent = LampIntent::from_invocation();
    let connector = LampConnector::from_config(&config.link);
    let dispatcher = CommandDispatcher::new(connector, ConsoleNotifier, &config);

    match dispatcher.dispatch(&intent).await {
        Ok(report) => {
            info!("Dispatched {:?} via {}", report.line.as_str(), report.transport);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Dispatch failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
