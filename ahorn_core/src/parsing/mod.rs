//! Parsers for datasheet front-matter.
//!
//! # Parsers
//!
//! - [`frontmatter`]: Decode one datasheet's front-matter into a typed record
//!
//! # Example
//!
//! ```
//! use ahorn_core::parsing::frontmatter::parse_front_matter_str;
//!
//! let front_matter = parse_front_matter_str(
//!     "karate-club",
//!     r#"{"title": "Karate Club", "statistics": {"numNodes": 34}}"#,
//! )
//! .expect("valid front-matter");
//! assert_eq!(front_matter.summary("karate-club").num_nodes, 34);
//! ```

pub mod frontmatter;


pub use frontmatter::{parse_front_matter_str, parse_front_matter_value, FrontMatter};
