#![deny(missing_docs)]

//! # senkyo-core: Domain Core for the Candidate Information Service
//!
//! Everything the web layer needs to answer "who is running, what do they
//! stand for, and how do they compare" lives here. The crate performs no
//! network I/O; the only input it reads is the candidate dataset.
//!
//! ## Components
//!
//! | Module        | Responsibility                                         |
//! |---------------|--------------------------------------------------------|
//! | [`candidate`] | Record schema, identifiers, promise slots              |
//! | [`store`]     | Read-only ordered candidate store and dataset loading  |
//! | [`stance`]    | Free-text stance labels to a fixed canonical set       |
//! | [`filter`]    | Party / key-policy / name predicates                   |
//! | [`compare`]   | Row-oriented side-by-side comparison tables            |
//! | [`party`]     | Known parties and their presentation styles            |
//! | [`region`]    | Electoral district label normalisation                 |
//!
//! ## Design Principles
//!
//! 1. **The store is immutable after load.** There are no create, update, or
//!    delete operations, so sharing it across requests needs no locking.
//!
//! 2. **Lookups are total.** Unknown ids, unrecognised stances, and empty
//!    filter results are ordinary values (`None`, [`Stance::Unanswered`],
//!    an empty `Vec`), never errors.
//!
//! 3. **Absent is not empty.** Optional fields are `Option`s, so a candidate
//!    without a second promise differs from one whose second promise is `""`.

pub mod candidate;
pub mod compare;
pub mod error;
pub mod filter;
pub mod party;
pub mod region;
pub mod stance;
pub mod store;

pub use candidate::{parse_id_list, Candidate, CandidateId, Promises};
pub use compare::{
    build_table, ComparisonRow, ComparisonTable, RowKind, Section, Sections, PROMISE_SLOTS,
};
pub use error::{DatasetError, ParseError};
pub use filter::{apply, FilterState, Selection};
pub use party::{Party, PartyStyle};
pub use region::{normalize_region, RegionSummary};
pub use stance::{normalize, order_topics, Stance, StanceMeta, TOPIC_ORDER};
pub use store::CandidateStore;
