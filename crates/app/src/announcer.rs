//! Announcement channel: serializes everything the assistant says.
//!
//! [`Announcer::announce`] pushes the text onto an unbounded FIFO and
//! immediately publishes an `assistant_response` event, so callers never wait
//! for speech. A single [`SynthesisWorker`] task drains the queue one item at
//! a time, which guarantees that utterances never overlap.
//!
//! The speech engine is built lazily on first use. If speaking fails the
//! engine is stopped and dropped, and the next announcement builds a fresh
//! one.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use voicehome_domain::announcement::Announcement;
use voicehome_domain::event::Event;

use crate::ports::{EventPublisher, SpeechSynthesizer, SynthesizerFactory};

enum Job {
    Speak(Announcement),
    Stop,
}

/// Producer side of the announcement channel. Cheap to clone.
pub struct Announcer<P> {
    queue: mpsc::UnboundedSender<Job>,
    publisher: P,
}

impl<P: Clone> Clone for Announcer<P> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

impl<P: EventPublisher> Announcer<P> {
    /// Spawn the synthesis worker on the current tokio runtime and return the
    /// producer handle together with the worker handle used for shutdown.
    pub fn spawn<F: SynthesizerFactory>(factory: F, publisher: P) -> (Self, SynthesisWorker) {
        let (queue, jobs) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_worker(factory, jobs));
        let worker = SynthesisWorker {
            queue: queue.clone(),
            handle,
        };
        (Self { queue, publisher }, worker)
    }

    /// Queue `announcement` for speech and broadcast it to observers.
    ///
    /// Returns as soon as the item is queued.
    pub fn announce(&self, announcement: Announcement) {
        tracing::info!(text = %announcement, "announcing");
        if self.queue.send(Job::Speak(announcement.clone())).is_err() {
            tracing::warn!("synthesis worker is gone, announcement will not be spoken");
        }
        self.publisher.publish(Event::assistant_response(&announcement));
    }
}

/// Counters returned by a worker that shut down cleanly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub spoken: usize,
    pub failed: usize,
}

/// Why the worker could not be joined cleanly.
#[derive(Debug, thiserror::Error)]
pub enum ShutdownError {
    #[error("synthesis worker did not stop within {0:?}")]
    TimedOut(Duration),
    #[error("synthesis worker crashed")]
    Crashed(#[from] tokio::task::JoinError),
}

/// Owner handle of the synthesis worker task.
pub struct SynthesisWorker {
    queue: mpsc::UnboundedSender<Job>,
    handle: JoinHandle<WorkerReport>,
}

impl SynthesisWorker {
    /// Ask the worker to stop after everything already queued, then wait up to
    /// `timeout` for it to finish.
    ///
    /// The utterance in flight is never cut short.
    ///
    /// # Errors
    ///
    /// Returns [`ShutdownError::TimedOut`] when the worker is still speaking
    /// after `timeout`, or [`ShutdownError::Crashed`] if the task panicked.
    pub async fn shutdown(self, timeout: Duration) -> Result<WorkerReport, ShutdownError> {
        if self.queue.send(Job::Stop).is_err() {
            tracing::debug!("synthesis worker already exited");
        }
        match tokio::time::timeout(timeout, self.handle).await {
            Ok(joined) => Ok(joined?),
            Err(_) => Err(ShutdownError::TimedOut(timeout)),
        }
    }
}

async fn run_worker<F: SynthesizerFactory>(
    factory: F,
    mut jobs: mpsc::UnboundedReceiver<Job>,
) -> WorkerReport {
    let mut engine: Option<F::Synthesizer> = None;
    let mut report = WorkerReport::default();

    while let Some(job) = jobs.recv().await {
        let Job::Speak(announcement) = job else {
            tracing::debug!("synthesis worker received stop");
            break;
        };

        if engine.is_none() {
            match factory.create() {
                Ok(created) => engine = Some(created),
                Err(err) => {
                    tracing::error!(error = %err, "failed to build speech engine");
                    report.failed += 1;
                    continue;
                }
            }
        }
        let Some(synth) = engine.as_mut() else {
            continue;
        };

        let outcome = synth.speak(announcement.text()).await;
        match outcome {
            Ok(()) => report.spoken += 1,
            Err(err) => {
                tracing::error!(error = %err, "speech synthesis failed, resetting engine");
                report.failed += 1;
                if let Some(mut broken) = engine.take() {
                    broken.stop();
                }
            }
        }
    }

    tracing::debug!(
        spoken = report.spoken,
        failed = report.failed,
        "synthesis worker exited"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::InProcessEventBus;
    use crate::ports::SynthesisError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use voicehome_domain::event::Notification;

    #[derive(Clone, Default)]
    struct Log(Arc<Mutex<Vec<String>>>);

    impl Log {
        fn push(&self, line: String) {
            self.0.lock().unwrap().push(line);
        }

        fn lines(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct RecordingSynth {
        log: Log,
        delay: Duration,
    }

    impl SpeechSynthesizer for RecordingSynth {
        async fn speak(&mut self, text: &str) -> Result<(), SynthesisError> {
            self.log.push(format!("start:{text}"));
            if text == "panic" {
                panic!("engine exploded");
            }
            tokio::time::sleep(self.delay).await;
            if text == "boom" {
                return Err(SynthesisError::Failed("driver error".to_string()));
            }
            self.log.push(format!("end:{text}"));
            Ok(())
        }

        fn stop(&mut self) {
            self.log.push("stop".to_string());
        }
    }

    struct RecordingFactory {
        log: Log,
        delay: Duration,
        created: Arc<AtomicUsize>,
        fail_first: bool,
    }

    impl RecordingFactory {
        fn new(log: &Log, delay: Duration) -> Self {
            Self {
                log: log.clone(),
                delay,
                created: Arc::new(AtomicUsize::new(0)),
                fail_first: false,
            }
        }
    }

    impl SynthesizerFactory for RecordingFactory {
        type Synthesizer = RecordingSynth;

        fn create(&self) -> Result<RecordingSynth, SynthesisError> {
            let attempt = self.created.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && attempt == 0 {
                return Err(SynthesisError::Unavailable("no audio device".to_string()));
            }
            Ok(RecordingSynth {
                log: self.log.clone(),
                delay: self.delay,
            })
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn should_speak_announcements_in_order_one_at_a_time() {
        let log = Log::default();
        let bus = Arc::new(InProcessEventBus::new(16));
        let (announcer, worker) =
            Announcer::spawn(RecordingFactory::new(&log, Duration::from_millis(20)), bus);

        announcer.announce(Announcement::new("a1"));
        announcer.announce(Announcement::new("a2"));
        announcer.announce(Announcement::new("a3"));

        let report = worker.shutdown(TIMEOUT).await.unwrap();
        assert_eq!(report.spoken, 3);
        assert_eq!(
            log.lines(),
            vec!["start:a1", "end:a1", "start:a2", "end:a2", "start:a3", "end:a3"]
        );
    }

    #[tokio::test]
    async fn should_broadcast_before_speech_finishes() {
        let log = Log::default();
        let bus = Arc::new(InProcessEventBus::new(16));
        let mut rx = bus.subscribe();
        let (announcer, worker) = Announcer::spawn(
            RecordingFactory::new(&log, Duration::from_millis(200)),
            Arc::clone(&bus),
        );

        announcer.announce(Announcement::new("slow"));

        let event = rx.try_recv().unwrap();
        assert_eq!(
            event.notification,
            Notification::AssistantResponse {
                text: "slow".to_string()
            }
        );
        assert!(!log.lines().contains(&"end:slow".to_string()));

        worker.shutdown(TIMEOUT).await.unwrap();
    }

    #[tokio::test]
    async fn should_recreate_engine_after_speech_failure() {
        let log = Log::default();
        let factory = RecordingFactory::new(&log, Duration::from_millis(1));
        let created = Arc::clone(&factory.created);
        let (announcer, worker) = Announcer::spawn(factory, Arc::new(InProcessEventBus::new(16)));

        announcer.announce(Announcement::new("boom"));
        announcer.announce(Announcement::new("fine"));

        let report = worker.shutdown(TIMEOUT).await.unwrap();
        assert_eq!(report, WorkerReport { spoken: 1, failed: 1 });
        assert_eq!(created.load(Ordering::SeqCst), 2);
        assert_eq!(
            log.lines(),
            vec!["start:boom", "stop", "start:fine", "end:fine"]
        );
    }

    #[tokio::test]
    async fn should_reuse_engine_while_it_keeps_working() {
        let log = Log::default();
        let factory = RecordingFactory::new(&log, Duration::from_millis(1));
        let created = Arc::clone(&factory.created);
        let (announcer, worker) = Announcer::spawn(factory, Arc::new(InProcessEventBus::new(16)));

        announcer.announce(Announcement::new("one"));
        announcer.announce(Announcement::new("two"));

        worker.shutdown(TIMEOUT).await.unwrap();
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_skip_item_and_retry_when_engine_cannot_be_built() {
        let log = Log::default();
        let mut factory = RecordingFactory::new(&log, Duration::from_millis(1));
        factory.fail_first = true;
        let (announcer, worker) = Announcer::spawn(factory, Arc::new(InProcessEventBus::new(16)));

        announcer.announce(Announcement::new("lost"));
        announcer.announce(Announcement::new("heard"));

        let report = worker.shutdown(TIMEOUT).await.unwrap();
        assert_eq!(report, WorkerReport { spoken: 1, failed: 1 });
        assert_eq!(log.lines(), vec!["start:heard", "end:heard"]);
    }

    #[tokio::test]
    async fn should_finish_in_flight_item_before_stopping() {
        let log = Log::default();
        let (announcer, worker) = Announcer::spawn(
            RecordingFactory::new(&log, Duration::from_millis(100)),
            Arc::new(InProcessEventBus::new(16)),
        );

        announcer.announce(Announcement::new("long"));
        tokio::time::sleep(Duration::from_millis(20)).await;

        let report = worker.shutdown(TIMEOUT).await.unwrap();
        assert_eq!(report.spoken, 1);
        assert_eq!(log.lines(), vec!["start:long", "end:long"]);
    }

    #[tokio::test]
    async fn should_time_out_when_worker_is_stuck() {
        let log = Log::default();
        let (announcer, worker) = Announcer::spawn(
            RecordingFactory::new(&log, Duration::from_secs(10)),
            Arc::new(InProcessEventBus::new(16)),
        );

        announcer.announce(Announcement::new("endless"));

        let result = worker.shutdown(Duration::from_millis(50)).await;
        assert!(matches!(result, Err(ShutdownError::TimedOut(_))));
    }

    #[tokio::test]
    async fn should_not_hang_when_worker_already_crashed() {
        let log = Log::default();
        let (announcer, worker) = Announcer::spawn(
            RecordingFactory::new(&log, Duration::from_millis(1)),
            Arc::new(InProcessEventBus::new(16)),
        );

        announcer.announce(Announcement::new("panic"));
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Still broadcasts even though nobody will speak it.
        announcer.announce(Announcement::new("after"));

        let result = worker.shutdown(TIMEOUT).await;
        assert!(matches!(result, Err(ShutdownError::Crashed(_))));
    }
}
