//! Single-writer actor for the SQLite database.
//!
//! SQLite tolerates many readers but only one writer. All mutations are
//! funneled through one background task that owns a dedicated connection
//! and runs each job inside an immediate transaction, so individual
//! writes are atomic and never contend with each other.

use std::any::Any;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use marketlens_core::errors::Result;

// A job is a closure run on the writer's connection. Return values are
// type-erased through `Box<dyn Any>` so one channel carries every job.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type ErasedReply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, ErasedReply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection
    /// and awaits its result.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |conn| job(conn).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                reply_tx,
            ))
            .await
            .expect("writer actor channel closed; the actor has stopped");

        reply_rx
            .await
            .expect("writer actor dropped the reply sender without answering")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer actor result had an unexpected type"))
            })
    }
}

/// Spawns the writer task. It takes one connection from the pool and
/// holds it for its whole lifetime, processing jobs serially until every
/// `WriteHandle` is dropped.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, ErasedReply)>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("failed to reserve a connection for the writer actor");

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // The requester may have given up (dropped the receiver);
            // that is fine, the write still happened.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
