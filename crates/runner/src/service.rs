//! Engine Service - the single owner of the dispatch engine
//!
//! The service task owns the [`SimulationEngine`] and multiplexes two inputs:
//! commands from any number of [`EngineHandle`]s and ticks from the timer.
//! Each input is applied to completion before the next is taken, so callers
//! and the timer never observe a half-applied step.
//!
//! After every command and every tick the service broadcasts an
//! [`EngineUpdate`] carrying the events produced and a fresh snapshot.

use counter_clock::{SystemClock, ticker_for};
use counter_core::{BotId, OrderId, Priority, Tick, Timestamp};
use counter_engine::{EngineEvent, EngineSnapshot, RemovalOutcome, SimulationEngine};
use counter_ports::{Clock, TickSource};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::config::RunnerConfig;
use crate::error::{Result, RunnerError};
use crate::order_feed::OrderFeed;

/// State pushed to subscribers after each applied input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineUpdate {
    /// Wall-clock time the update was produced
    pub at: Timestamp,
    pub tick: Tick,
    pub events: Vec<EngineEvent>,
    pub snapshot: EngineSnapshot,
}

/// Summary returned when the service stops
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub ticks: Tick,
    pub orders_submitted: usize,
    pub orders_completed: usize,
    pub orders_pending: usize,
    pub bots: usize,
}

enum Command {
    SubmitOrder {
        priority: Priority,
        reply: oneshot::Sender<OrderId>,
    },
    AddBot {
        reply: oneshot::Sender<BotId>,
    },
    RemoveBot {
        reply: oneshot::Sender<RemovalOutcome>,
    },
    Snapshot {
        reply: oneshot::Sender<EngineSnapshot>,
    },
    Step {
        ticks: u64,
        reply: oneshot::Sender<Tick>,
    },
    Shutdown,
}

/// Cloneable front end to a running [`EngineService`]
#[derive(Clone)]
pub struct EngineHandle {
    command_tx: mpsc::Sender<Command>,
    update_tx: broadcast::Sender<EngineUpdate>,
}

impl EngineHandle {
    pub async fn submit_order(&self, priority: Priority) -> Result<OrderId> {
        self.request(|reply| Command::SubmitOrder { priority, reply })
            .await
    }

    pub async fn add_bot(&self) -> Result<BotId> {
        self.request(|reply| Command::AddBot { reply }).await
    }

    pub async fn remove_bot(&self) -> Result<RemovalOutcome> {
        self.request(|reply| Command::RemoveBot { reply }).await
    }

    pub async fn snapshot(&self) -> Result<EngineSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Apply `ticks` ticks immediately, independent of the timer
    ///
    /// Returns the tick count after the last one.
    pub async fn step(&self, ticks: u64) -> Result<Tick> {
        self.request(|reply| Command::Step { ticks, reply }).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineUpdate> {
        self.update_tx.subscribe()
    }

    /// Ask the service to stop; commands already queued are applied first
    pub async fn shutdown(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|e| RunnerError::ChannelSend(e.to_string()))
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.command_tx
            .send(make(reply))
            .await
            .map_err(|e| RunnerError::ChannelSend(e.to_string()))?;
        response
            .await
            .map_err(|e| RunnerError::ChannelReceive(e.to_string()))
    }
}

pub struct EngineService {
    engine: SimulationEngine,
    ticker: Box<dyn TickSource>,
    clock: Arc<dyn Clock>,
    feed: Option<OrderFeed>,
    command_rx: mpsc::Receiver<Command>,
    update_tx: broadcast::Sender<EngineUpdate>,
}

impl EngineService {
    /// Start the service on the current runtime with the system clock
    pub fn spawn(config: RunnerConfig) -> Result<(EngineHandle, JoinHandle<SimulationResults>)> {
        Self::spawn_with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Start the service, stamping updates with `clock`
    pub fn spawn_with_clock(
        config: RunnerConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<(EngineHandle, JoinHandle<SimulationResults>)> {
        config.validate()?;

        let mut engine = SimulationEngine::new(config.engine)?;
        for _ in 0..config.initial_bots {
            engine.add_bot();
        }
        // Startup events are reflected in the first snapshot
        engine.take_events();

        let ticker = ticker_for(config.tick_interval(), config.time_scale);
        let feed = config.feed.clone().map(OrderFeed::new);

        let (command_tx, command_rx) = mpsc::channel(config.channel_capacity);
        let (update_tx, _) = broadcast::channel(config.channel_capacity);

        info!(
            "Engine service starting: {} bot(s), tick period {:?}, removal policy {}",
            config.initial_bots,
            ticker.period(),
            engine.removal_policy()
        );
        if let Some(feed) = &feed {
            info!(
                "Order feed on: arrival_probability={}, vip_probability={}",
                feed.config().arrival_probability,
                feed.config().vip_probability
            );
        }

        let service = Self {
            engine,
            ticker,
            clock,
            feed,
            command_rx,
            update_tx: update_tx.clone(),
        };
        let task = tokio::spawn(service.run());

        Ok((
            EngineHandle {
                command_tx,
                update_tx,
            },
            task,
        ))
    }

    async fn run(mut self) -> SimulationResults {
        loop {
            tokio::select! {
                biased;

                command = self.command_rx.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle(command),
                },
                _ = self.ticker.next_tick() => self.on_tick(),
            }
        }

        let results = self.results();
        info!(
            "Engine service stopped after {} ticks: {} submitted, {} completed, {} pending, {} bots",
            results.ticks,
            results.orders_submitted,
            results.orders_completed,
            results.orders_pending,
            results.bots
        );
        results
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::SubmitOrder { priority, reply } => {
                let id = self.engine.submit_order(priority);
                self.publish();
                let _ = reply.send(id);
            }
            Command::AddBot { reply } => {
                let id = self.engine.add_bot();
                self.publish();
                let _ = reply.send(id);
            }
            Command::RemoveBot { reply } => {
                let outcome = self.engine.remove_bot();
                self.publish();
                let _ = reply.send(outcome);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.engine.snapshot());
            }
            Command::Step { ticks, reply } => {
                for _ in 0..ticks {
                    self.on_tick();
                }
                let _ = reply.send(self.engine.current_tick());
            }
            Command::Shutdown => {}
        }
    }

    fn on_tick(&mut self) {
        let report = self.engine.tick();
        if !report.completed.is_empty() {
            debug!(
                "Tick {}: {} completed, {} assigned",
                report.tick,
                report.completed.len(),
                report.assigned.len()
            );
        }

        if let Some(priority) = self.feed.as_mut().and_then(OrderFeed::next_arrival) {
            let id = self.engine.submit_order(priority);
            debug!("Tick {}: order {} ({}) arrived", report.tick, id, priority);
        }

        self.publish();
    }

    fn publish(&mut self) {
        let events = self.engine.take_events();
        if self.update_tx.receiver_count() == 0 {
            return;
        }

        let update = EngineUpdate {
            at: self.clock.now(),
            tick: self.engine.current_tick(),
            events,
            snapshot: self.engine.snapshot(),
        };
        // Lagging subscribers lose the oldest updates
        let _ = self.update_tx.send(update);
    }

    fn results(&self) -> SimulationResults {
        let snapshot = self.engine.snapshot();
        let stats = snapshot.stats();
        SimulationResults {
            ticks: snapshot.tick,
            orders_submitted: snapshot.orders.len(),
            orders_completed: stats.completed,
            orders_pending: stats.pending,
            bots: snapshot.bots.len(),
        }
    }
}
