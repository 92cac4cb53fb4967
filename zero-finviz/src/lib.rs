//! Zero Finviz Library
//!
//! Two-way codec between semantic stock-screen requests and the Finviz
//! screener: requests compile into the positional filter mini-language of
//! the export URL, and CSV exports decode back into typed records.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    zero-finviz (screening codec)                    │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  ScreenRequest ──▶ Validator ──▶ FilterCompiler ──▶ CompiledScreen  │
//! │                        ▲               ▲                  │         │
//! │                        └─ FieldRegistry ┘                 ▼         │
//! │                                                    ExportFetcher    │
//! │                                                    (caller-owned)   │
//! │                                                           │ CSV     │
//! │  DecodedBatch ◀── ResponseDecoder ◀── ResponseSchema ◀────┘         │
//! │                                                                     │
//! │  Screener: compile → fetch → decode, one traced span per run        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Concepts
//!
//! ## Filter tokens
//! - Every constraint becomes one `{field_id}_{body}` token, joined with `,`
//! - Numeric bounds prefer a field's named shortcut (`sh_relvol_o1.5`) where
//!   the field accepts one, else render as `{min}to{max}`
//! - Compound fields join their parts with a fixed separator (`ta_perf_0to-4w`)
//!
//! ## Export decoding
//! - `-` means no data and decodes as absent, never zero
//! - `5.2%` decodes as the rate `0.052`, `1.5B` as `1_500_000_000`
//! - A bad cell degrades to absent with a warning; a bad header fails the batch

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod error;
pub mod filter;
pub mod registry;
pub mod response;
pub mod screen;

pub use error::{CellError, CompileError, DecodeError, ScreenError};
pub use filter::{
    CompileOptions, CompiledScreen, CompiledToken, FilterCompiler, FilterPayload, FilterSpec,
    ScreenRequest, SortDirective, SortKey, SortOrder, Validator,
};
pub use registry::{EncodingKind, FieldDescriptor, FieldGroup, FieldRegistry, Unit};
pub use response::{
    DecodeOptions, DecodeWarning, DecodedBatch, FieldValue, ResponseDecoder, ResponseSchema,
    StockRecord,
};
pub use screen::{
    EarningsWinners, ExportFetcher, NamedScreen, ScreenOutcome, Screener, ScreenerOptions,
};
