//! CLI route: single route table and run context.

use crate::cli::output::{format_catalog_json, format_catalog_text, format_dropped, format_requests};
use crate::cli::parse::{Cli, Commands};
use crate::client::{TicsClient, TicsClientBuilder};
use crate::config::{ConfigLoader, TicsConfig};
use crate::error::TicsError;
use crate::event::EventRecord;
use crate::ids::new_unique_id;
use crate::session::Outcome;
use crate::transport::MemoryTransport;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Runtime context for CLI execution: effective config and the client built from it.
pub struct RunContext {
    config: TicsConfig,
    client: TicsClient,
    recorder: Option<Arc<MemoryTransport>>,
}

/// Endpoint flags that override loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct EndpointFlags {
    pub host: Option<String>,
    pub base_path: Option<String>,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        flags: EndpointFlags,
        dry_run: bool,
    ) -> Result<Self, TicsError> {
        let mut config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        if let Some(host) = flags.host {
            config.endpoint.host = host;
        }
        if let Some(base_path) = flags.base_path {
            config.endpoint.base_path = base_path;
        }

        let mut builder = TicsClientBuilder::from_config(&config)?;
        let recorder = if dry_run {
            let recorder = Arc::new(MemoryTransport::new());
            builder = builder.transport(recorder.clone());
            Some(recorder)
        } else {
            None
        };

        Ok(Self {
            config,
            client: builder.build()?,
            recorder,
        })
    }

    pub fn from_cli(cli: &Cli) -> Result<Self, TicsError> {
        Self::new(
            cli.workspace.clone(),
            cli.config.clone(),
            EndpointFlags {
                host: cli.host.clone(),
                base_path: cli.base_path.clone(),
            },
            cli.dry_run,
        )
    }

    pub fn client(&self) -> &TicsClient {
        &self.client
    }

    pub fn config(&self) -> &TicsConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, TicsError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command.name(),
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "command finished"
        );

        let output = result?;
        match &self.recorder {
            Some(recorder) => {
                let requests = format_requests(&recorder.requests());
                if requests.is_empty() {
                    Ok(output)
                } else {
                    Ok(format!("{}\n\n[dry run] requests:\n{}", output, requests))
                }
            }
            None => Ok(output),
        }
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, TicsError> {
        match command {
            Commands::Catalog { format } => {
                if format == "json" {
                    format_catalog_json(self.client.catalog())
                } else {
                    Ok(format_catalog_text(self.client.catalog()))
                }
            }
            Commands::Register { id } => self.handle_register(id.as_deref()),
            Commands::Log {
                id,
                event_type,
                subtype,
                x,
                y,
                z,
                magnitude,
                data,
                debug_only,
            } => {
                let mut record = EventRecord::new(*event_type)
                    .subtype(*subtype)
                    .position(*x, *y, *z)
                    .magnitude(*magnitude);
                if let Some(data) = data {
                    record = record.data(data.clone());
                }
                self.handle_log(id.as_deref(), &record, *debug_only)
            }
            Commands::Replay { id, file } => self.handle_replay(id.as_deref(), file),
            Commands::Auth { id, set } => self.handle_auth(id, *set),
            Commands::Params { id, query } => self.handle_params(id.as_deref(), query),
            Commands::Config { format } => {
                if format == "json" {
                    serde_json::to_string_pretty(&self.config)
                        .map_err(|e| TicsError::Config(e.to_string()))
                } else {
                    self.config.to_toml()
                }
            }
        }
    }

    /// Run `f` inside a metric session, closing it whatever `f` returns. A dropped open is
    /// reported as the command output.
    fn in_metric_session(
        &self,
        id: Option<&str>,
        f: impl FnOnce(&TicsClient) -> Result<String, TicsError>,
    ) -> Result<String, TicsError> {
        let id = id
            .map(str::to_string)
            .unwrap_or_else(|| new_unique_id("cli"));
        if let Outcome::Dropped(reason) = self.client.open_metric_session(&id)? {
            return Ok(format_dropped("open_metric_session", reason));
        }
        debug!(unique_id = %id, "metric session open for command");

        let result = f(&self.client);
        let closed = self.client.close_metric_session().map(|_| ());
        let output = result?;
        closed?;
        Ok(output)
    }

    /// Run `f` inside a play session nested in a metric session.
    fn in_play_session(
        &self,
        id: Option<&str>,
        f: impl FnOnce(&TicsClient) -> Result<String, TicsError>,
    ) -> Result<String, TicsError> {
        self.in_metric_session(id, |client| {
            if let Outcome::Dropped(reason) = client.start_play_session()? {
                return Ok(format_dropped("start_play_session", reason));
            }
            f(client)
        })
    }

    fn handle_register(&self, id: Option<&str>) -> Result<String, TicsError> {
        self.in_metric_session(id, |client| {
            Ok(match client.register_catalog()? {
                Outcome::Completed(count) => format!(
                    "Registered {} catalog entries (version {})",
                    count,
                    client.catalog().version()
                ),
                Outcome::Dropped(reason) => format_dropped("register_events", reason),
            })
        })
    }

    fn handle_log(
        &self,
        id: Option<&str>,
        record: &EventRecord,
        debug_only: bool,
    ) -> Result<String, TicsError> {
        self.in_play_session(id, |client| {
            let outcome = if debug_only {
                client.log_event_if_debug(record)?
            } else {
                client.log_event(record)?
            };
            Ok(match outcome {
                Outcome::Completed(tick) => {
                    format!("Logged event type {} at tick {}", record.event_type, tick)
                }
                Outcome::Dropped(reason) => format_dropped("log_event", reason),
            })
        })
    }

    fn handle_replay(&self, id: Option<&str>, file: &Path) -> Result<String, TicsError> {
        let records = read_records(file)?;
        self.in_play_session(id, |client| {
            let mut sent = 0usize;
            let mut dropped = 0usize;
            for record in &records {
                match client.log_event(record)? {
                    Outcome::Completed(_) => sent += 1,
                    Outcome::Dropped(_) => dropped += 1,
                }
            }
            Ok(format!(
                "Replayed {} events from {} ({} dropped)",
                sent,
                file.display(),
                dropped
            ))
        })
    }

    fn handle_auth(&self, id: &str, set: Option<bool>) -> Result<String, TicsError> {
        match set {
            Some(auth) => {
                self.client.set_authorised(id, auth)?;
                Ok(format!("Set authorised={} for {}", auth, id))
            }
            None => {
                let authorised = self.client.is_authorised(id)?;
                Ok(format!(
                    "{}: {}",
                    id,
                    if authorised { "authorised" } else { "not authorised" }
                ))
            }
        }
    }

    fn handle_params(&self, id: Option<&str>, query: &str) -> Result<String, TicsError> {
        self.in_metric_session(id, |client| {
            Ok(match client.request_parameters(query)? {
                Outcome::Completed(reply) => reply,
                Outcome::Dropped(reason) => format_dropped("request_parameters", reason),
            })
        })
    }
}

/// Parse one [`EventRecord`] per non-blank line.
pub fn read_records(file: &Path) -> Result<Vec<EventRecord>, TicsError> {
    let text = std::fs::read_to_string(file)?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<EventRecord>(line).map_err(|e| {
                TicsError::MalformedPayload(format!(
                    "{}:{}: {}",
                    file.display(),
                    index + 1,
                    e
                ))
            })
        })
        .collect()
}
