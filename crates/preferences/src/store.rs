//! Single-writer preference store.
//!
//! One blocking worker owns the backend and the current snapshot. Handles
//! send commands over a bounded queue, so reads observe every edit queued
//! before them and edits never race each other.

use std::path::PathBuf;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::backend::{FileBackend, MemoryBackend, PreferenceBackend};
use crate::error::{PreferenceError, PreferenceResult};
use crate::key::PreferenceKey;
use crate::preferences::Preferences;
use crate::value::PreferenceType;

const COMMAND_BUFFER: usize = 64;

type EditFn = Box<dyn FnOnce(&mut Preferences) + Send>;

enum Command {
    Snapshot {
        reply: oneshot::Sender<Preferences>,
    },
    Edit {
        edit: EditFn,
        reply: oneshot::Sender<PreferenceResult<Preferences>>,
    },
}

/// Cloneable handle to the preference worker.
#[derive(Clone)]
pub struct PreferenceStore {
    commands: mpsc::Sender<Command>,
    published: watch::Receiver<Preferences>,
}

impl PreferenceStore {
    /// Start a worker over `backend`, loading the persisted snapshot first.
    pub async fn open<B: PreferenceBackend>(backend: B) -> PreferenceResult<Self> {
        let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
        let (ready_tx, ready_rx) = oneshot::channel();

        tokio::task::spawn_blocking(move || run_worker(backend, receiver, ready_tx));

        let published = ready_rx.await.map_err(|_| PreferenceError::Closed)??;
        Ok(Self {
            commands,
            published,
        })
    }

    pub async fn open_file(path: impl Into<PathBuf>) -> PreferenceResult<Self> {
        let backend = FileBackend::new(path);
        info!(path = %backend.path().display(), "opening preference store");
        Self::open(backend).await
    }

    pub async fn in_memory() -> PreferenceResult<Self> {
        Self::open(MemoryBackend::new()).await
    }

    /// Current snapshot, ordered after every edit already queued.
    pub async fn data(&self) -> PreferenceResult<Preferences> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Snapshot { reply }).await?;
        response.await.map_err(|_| PreferenceError::Closed)
    }

    pub async fn get<T: PreferenceType>(&self, key: &PreferenceKey<T>) -> PreferenceResult<T> {
        Ok(self.data().await?.get(key))
    }

    pub async fn set<T>(&self, key: &PreferenceKey<T>, value: T) -> PreferenceResult<()>
    where
        T: PreferenceType + Send + 'static,
    {
        let key = key.clone();
        self.edit(move |prefs| prefs.set(&key, value)).await?;
        Ok(())
    }

    /// Apply `edit` to a copy of the snapshot and persist it. The new snapshot
    /// is published only once the backend accepted it, so a multi-key edit
    /// either lands entirely or not at all.
    pub async fn edit<F>(&self, edit: F) -> PreferenceResult<Preferences>
    where
        F: FnOnce(&mut Preferences) + Send + 'static,
    {
        let (reply, response) = oneshot::channel();
        self.send(Command::Edit {
            edit: Box::new(edit),
            reply,
        })
        .await?;
        response.await.map_err(|_| PreferenceError::Closed)?
    }

    /// Like [`edit`](Self::edit), but hands back a value computed from the
    /// snapshot being edited.
    pub async fn update<F, R>(&self, update: F) -> PreferenceResult<(Preferences, R)>
    where
        F: FnOnce(&mut Preferences) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (output_tx, output_rx) = oneshot::channel();
        let committed = self
            .edit(move |prefs| {
                let _ = output_tx.send(update(prefs));
            })
            .await?;
        let output = output_rx.await.map_err(|_| PreferenceError::Closed)?;
        Ok((committed, output))
    }

    /// Observe committed snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.published.clone()
    }

    async fn send(&self, command: Command) -> PreferenceResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| PreferenceError::Closed)
    }
}

fn run_worker<B: PreferenceBackend>(
    mut backend: B,
    mut receiver: mpsc::Receiver<Command>,
    ready: oneshot::Sender<PreferenceResult<watch::Receiver<Preferences>>>,
) {
    let mut current = match backend.load() {
        Ok(preferences) => preferences,
        Err(error) => {
            let _ = ready.send(Err(error));
            return;
        }
    };

    debug!(entries = current.len(), "preference worker started");
    let (publisher, published) = watch::channel(current.clone());
    if ready.send(Ok(published)).is_err() {
        return;
    }

    while let Some(command) = receiver.blocking_recv() {
        match command {
            Command::Snapshot { reply } => {
                let _ = reply.send(current.clone());
            }
            Command::Edit { edit, reply } => {
                let mut next = current.clone();
                edit(&mut next);

                if next == current {
                    let _ = reply.send(Ok(current.clone()));
                    continue;
                }

                let result = match backend.persist(&next) {
                    Ok(()) => {
                        current = next;
                        publisher.send_replace(current.clone());
                        Ok(current.clone())
                    }
                    Err(error) => {
                        warn!(%error, "preference write failed, keeping previous snapshot");
                        Err(error)
                    }
                };
                let _ = reply.send(result);
            }
        }
    }

    debug!("preference worker stopped");
}
