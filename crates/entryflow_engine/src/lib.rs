//! Entryflow engine: IO pipeline and check-cycle execution.
mod engine;
mod convert;
mod cycle;
mod decode;
mod parse;
mod persist;
mod fetch;
mod types;

pub use engine::EngineHandle;
pub use convert::{Converter, Html2MdConverter};
pub use cycle::run_check;
pub use decode::{decode_page, DecodedPage};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use parse::{SelectorThreadParser, ThreadParser};
pub use persist::{ensure_state_dir, write_atomically, PersistError};
pub use types::{
    CheckFailure, CheckOutcome, CheckSnapshot, EngineEvent, EntryId, FailureKind, FetchError,
    FetchOutput, PageInfo, RemoteEntry, SeedDocument,
};
