//! Command loop owning the store and the handle used to reach it.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, broadcast, mpsc, oneshot};

use crate::{
    airport::{AirportDraft, AirportRecord, AirportView, ValidationError, with_region},
    core::store::{AirportStore, StoreError},
    engine::{
        query::{ListQuery, ListResponse, run_query},
        reports::{self, CountryElevation, TimezoneCount},
    },
    persist::{PersistError, SnapshotSink},
    types::Icao,
};

use super::events::AirportEvent;

/// Failure of a runtime request.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Creation payload missing required fields.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Duplicate or unknown key.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The mutation applied in memory but the write failed.
    #[error("persistence failed: {0}")]
    Persist(#[from] PersistError),
    /// The runtime task has stopped.
    #[error("airport runtime is not running")]
    ChannelClosed,
}

/// Channel sizing for [`spawn_airport_runtime`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Pending commands before senders wait.
    pub command_queue_bound: usize,
    /// Broadcast buffer; slow subscribers lag past it.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}

/// Cloneable front door to the runtime task that owns the store.
#[derive(Clone)]
pub struct AirportHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<AirportEvent>,
}

type SharedSink = Arc<Mutex<Box<dyn SnapshotSink>>>;

enum Command {
    Insert {
        record: AirportRecord,
        resp: oneshot::Sender<Result<AirportView, RuntimeError>>,
    },
    Remove {
        icao: Icao,
        resp: oneshot::Sender<Result<AirportRecord, RuntimeError>>,
    },
    Get {
        icao: Icao,
        resp: oneshot::Sender<Result<AirportView, RuntimeError>>,
    },
    List {
        resp: oneshot::Sender<Vec<AirportRecord>>,
    },
    Query {
        query: ListQuery,
        resp: oneshot::Sender<ListResponse>,
    },
    AverageElevation {
        resp: oneshot::Sender<i64>,
    },
    AverageElevationPerCountry {
        resp: oneshot::Sender<Vec<CountryElevation>>,
    },
    MissingIata {
        resp: oneshot::Sender<Vec<AirportView>>,
    },
    TopTimezones {
        limit: usize,
        resp: oneshot::Sender<Vec<TimezoneCount>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Spawns the task that owns `store` and serializes every read and mutation.
///
/// With a sink, each successful mutation rewrites the whole collection before
/// the caller gets a reply.
pub fn spawn_airport_runtime(
    store: AirportStore,
    sink: Option<Box<dyn SnapshotSink>>,
    config: RuntimeConfig,
) -> AirportHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<AirportEvent>(config.event_capacity.max(1));
    let sink: Option<SharedSink> = sink.map(|s| Arc::new(Mutex::new(s)));

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut store = store;
        while let Some(cmd) = cmd_rx.recv().await {
            let done = handle_command(cmd, &mut store, sink.as_ref(), &events_tx_loop).await;
            if done {
                break;
            }
        }
        tracing::debug!("airport runtime stopped");
    });

    AirportHandle { cmd_tx, events_tx }
}

impl AirportHandle {
    /// New receiver for [`AirportEvent`]s emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<AirportEvent> {
        self.events_tx.subscribe()
    }

    /// Validates and inserts a new airport, returning its read view.
    pub async fn insert(&self, draft: AirportDraft) -> Result<AirportView, RuntimeError> {
        let record = draft.into_record()?;
        self.request(|resp| Command::Insert { record, resp }).await?
    }

    /// Removes an airport and returns it as it was.
    pub async fn remove(&self, icao: impl Into<Icao>) -> Result<AirportRecord, RuntimeError> {
        let icao = icao.into();
        self.request(|resp| Command::Remove { icao, resp }).await?
    }

    /// Read view of one airport.
    pub async fn get(&self, icao: impl Into<Icao>) -> Result<AirportView, RuntimeError> {
        let icao = icao.into();
        self.request(|resp| Command::Get { icao, resp }).await?
    }

    /// Every record in store order.
    pub async fn list(&self) -> Result<Vec<AirportRecord>, RuntimeError> {
        self.request(|resp| Command::List { resp }).await
    }

    /// Runs the listing pipeline.
    pub async fn query(&self, query: ListQuery) -> Result<ListResponse, RuntimeError> {
        self.request(|resp| Command::Query { query, resp }).await
    }

    /// See [`reports::average_elevation`].
    pub async fn average_elevation(&self) -> Result<i64, RuntimeError> {
        self.request(|resp| Command::AverageElevation { resp }).await
    }

    /// See [`reports::average_elevation_per_country`].
    pub async fn average_elevation_per_country(&self) -> Result<Vec<CountryElevation>, RuntimeError> {
        self.request(|resp| Command::AverageElevationPerCountry { resp })
            .await
    }

    /// See [`reports::missing_iata`].
    pub async fn missing_iata(&self) -> Result<Vec<AirportView>, RuntimeError> {
        self.request(|resp| Command::MissingIata { resp }).await
    }

    /// See [`reports::top_timezones`].
    pub async fn top_timezones(&self, limit: usize) -> Result<Vec<TimezoneCount>, RuntimeError> {
        self.request(|resp| Command::TopTimezones { limit, resp })
            .await
    }

    /// Stops the loop once earlier commands are answered.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

async fn handle_command(
    cmd: Command,
    store: &mut AirportStore,
    sink: Option<&SharedSink>,
    events_tx: &broadcast::Sender<AirportEvent>,
) -> bool {
    match cmd {
        Command::Insert { record, resp } => {
            let view = with_region(record.clone());
            let res = match store.insert(record) {
                Ok(()) => {
                    tracing::info!(icao = %view.id, "airport inserted");
                    let _ = events_tx.send(AirportEvent::Inserted {
                        icao: view.id.clone(),
                    });
                    persist_store(store, sink, events_tx).await.map(|()| view)
                }
                Err(err) => Err(err.into()),
            };
            let _ = resp.send(res);
        }
        Command::Remove { icao, resp } => {
            let res = match store.remove(&icao) {
                Ok(removed) => {
                    tracing::info!(%icao, "airport removed");
                    let _ = events_tx.send(AirportEvent::Removed { icao });
                    persist_store(store, sink, events_tx).await.map(|()| removed)
                }
                Err(err) => Err(err.into()),
            };
            let _ = resp.send(res);
        }
        Command::Get { icao, resp } => {
            let res = store
                .get_cloned(&icao)
                .map(with_region)
                .map_err(RuntimeError::from);
            let _ = resp.send(res);
        }
        Command::List { resp } => {
            let _ = resp.send(store.list());
        }
        Command::Query { query, resp } => {
            let _ = resp.send(run_query(store.iter(), &query));
        }
        Command::AverageElevation { resp } => {
            let _ = resp.send(reports::average_elevation(store.iter()));
        }
        Command::AverageElevationPerCountry { resp } => {
            let _ = resp.send(reports::average_elevation_per_country(store.iter()));
        }
        Command::MissingIata { resp } => {
            let _ = resp.send(reports::missing_iata(store.iter()));
        }
        Command::TopTimezones { limit, resp } => {
            let _ = resp.send(reports::top_timezones(store.iter(), limit));
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}

/// Rewrites the whole collection. A failure leaves the in-memory mutation in place.
async fn persist_store(
    store: &AirportStore,
    sink: Option<&SharedSink>,
    events_tx: &broadcast::Sender<AirportEvent>,
) -> Result<(), RuntimeError> {
    let Some(sink) = sink else {
        return Ok(());
    };

    let snapshot = store.export_snapshot();
    let records = snapshot.records.len();
    let sink_ref = Arc::clone(sink);
    let result = tokio::task::spawn_blocking(move || {
        let mut sink = sink_ref.blocking_lock();
        sink.write_snapshot(&snapshot)
    })
    .await
    .unwrap_or_else(|e| Err(PersistError::Message(format!("join error: {e}"))));

    match result {
        Ok(()) => {
            let _ = events_tx.send(AirportEvent::Persisted { records });
            Ok(())
        }
        Err(err) => {
            tracing::error!("error saving airport data: {err}");
            let _ = events_tx.send(AirportEvent::PersistFailed {
                message: err.to_string(),
            });
            Err(err.into())
        }
    }
}
