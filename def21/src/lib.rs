//!
//! # Def21 Design Exchange Format (DEF) Routing Paths
//!
//! Data model and writer for the routing content of DEF designs:
//! the `NETS` and `SPECIALNETS` sections, their wires and shields,
//! and the tagged token sequences ([DefPath]s) which describe each routed path.
//!
//! Paths are built token by token and replayed with a [PathCursor]:
//!
//! ```
//! use def21::*;
//!
//! let mut path = DefPath::new();
//! path.add_layer("M1");
//! path.add_width(100);
//! path.add_point(0, 0);
//! path.add_point(1000, 0);
//!
//! let mut net = DefNet::new("clk");
//! net.add_wire(DefRouteStatus::Routed, None);
//! net.add_wire_path(path, false).unwrap();
//! assert_eq!(net.num_wire_paths(), 1);
//! ```
//!

// Keyword enumerations. Must come first, so its macro is available to the modules below.
#[macro_use]
mod enumstr;
pub use enumstr::EnumStr;

// Primary data model
pub mod data;
pub use data::*;

pub mod path;
pub use path::{DefPath, FlushPoint, PathItem, PathToken, ViaData, ViaMask, ViaRect};

pub mod cursor;
pub use cursor::PathCursor;

pub mod net;
pub use net::*;

// Serialization, writing, and debug-printing
pub mod ser;
pub use ser::{SerdeFile, SerializationFormat};

pub mod print;
pub mod write;
