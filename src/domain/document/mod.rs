//! Markdown documents with optional YAML front matter

pub mod front_matter;
pub mod metadata;
pub mod node;
pub mod serialize;

pub use front_matter::{split_front_matter, strip_container_directives};
pub use metadata::{Decoded, MetaValue, Metadata, MetadataDecodeFailure};
pub use node::Node;
pub use serialize::{serialize_block, serialize_body, serialize_inline};
