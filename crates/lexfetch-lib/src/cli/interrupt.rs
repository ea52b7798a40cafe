use crate::error::LexFetchError;
use std::future::Future;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RunState {
    Finished,
    Interrupted,
}

/// Drives `work` until it finishes or Ctrl-C arrives; on Ctrl-C `work` is dropped mid-flight.
pub(crate) async fn run_until_interrupted<F>(work: F) -> Result<RunState, LexFetchError>
where
    F: Future<Output = Result<(), LexFetchError>>,
{
    run_until(work, tokio::signal::ctrl_c()).await
}

async fn run_until<F, S>(work: F, interrupt: S) -> Result<RunState, LexFetchError>
where
    F: Future<Output = Result<(), LexFetchError>>,
    S: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        result = work => result.map(|()| RunState::Finished),
        signal = interrupt => {
            signal?;
            Ok(RunState::Interrupted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    struct SetOnDrop(Arc<AtomicBool>);

    impl Drop for SetOnDrop {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_interrupt_drops_unfinished_work() {
        let dropped = Arc::new(AtomicBool::new(false));
        let guard = SetOnDrop(dropped.clone());
        let work = async move {
            let _guard = guard;
            std::future::pending::<()>().await;
            Ok::<(), LexFetchError>(())
        };

        let state = run_until(work, async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<(), std::io::Error>(())
        })
        .await
        .unwrap();

        assert_eq!(state, RunState::Interrupted);
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_finished_work_wins_and_errors_propagate() {
        let state = run_until(async { Ok::<(), LexFetchError>(()) }, std::future::pending())
            .await
            .unwrap();
        assert_eq!(state, RunState::Finished);

        let result = run_until(
            async {
                Err::<(), _>(LexFetchError::Discovery {
                    details: "empty".to_string(),
                })
            },
            std::future::pending(),
        )
        .await;
        assert!(matches!(result, Err(LexFetchError::Discovery { .. })));
    }

    #[tokio::test]
    async fn test_signal_listener_failure_is_reported() {
        let result = run_until(std::future::pending(), async {
            Err::<(), _>(std::io::Error::other("no signal handler"))
        })
        .await;
        assert!(matches!(result, Err(LexFetchError::Io(_))));
    }
}
