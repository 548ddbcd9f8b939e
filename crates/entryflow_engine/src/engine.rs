use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use url::Url;

use crate::cycle::run_check;
use crate::decode::decode_page;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::parse::{SelectorThreadParser, ThreadParser};
use crate::{CheckSnapshot, EngineEvent, FailureKind, FetchError, SeedDocument};

enum EngineCommand {
    Seed { url: String },
    RunCheck { snapshot: CheckSnapshot },
}

/// Handle to the background fetch runtime. Commands are fire-and-forget;
/// results come back as events drained with [`EngineHandle::try_recv`].
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let fetcher = Arc::new(ReqwestFetcher::new(settings)?);
        let parser = Arc::new(SelectorThreadParser);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let parser = parser.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), parser.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    /// Load the addressed page once to seed the session state.
    pub fn seed(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Seed { url: url.into() });
    }

    /// Run one check cycle against the given snapshot.
    pub fn run_check(&self, snapshot: CheckSnapshot) {
        let _ = self.cmd_tx.send(EngineCommand::RunCheck { snapshot });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        let event_rx = self.event_rx.lock().ok()?;
        event_rx.try_recv().ok()
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    parser: &dyn ThreadParser,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Seed { url } => {
            let result = load_seed(fetcher, parser, &url).await;
            let _ = event_tx.send(EngineEvent::SeedLoaded { result });
        }
        EngineCommand::RunCheck { snapshot } => {
            let result = run_check(fetcher, parser, &snapshot).await;
            let _ = event_tx.send(EngineEvent::CheckFinished { result });
        }
    }
}

/// Fetches the thread address exactly as given (its own page parameter
/// intact) and parses it into the initial session state.
async fn load_seed(
    fetcher: &dyn Fetcher,
    parser: &dyn ThreadParser,
    address: &str,
) -> Result<SeedDocument, FetchError> {
    let url = Url::parse(address)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    let output = fetcher.fetch(&url).await?;
    let decoded = decode_page(&output.bytes, output.content_type.as_deref())?;
    Ok(SeedDocument {
        thread_url: url.to_string(),
        entries: parser.entries(&decoded.html),
        page_info: parser.page_info(&decoded.html),
    })
}
