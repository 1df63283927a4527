//! Domain model for data packets and their projections.

mod data_type;
mod error;
mod ids;
mod packet;
mod projection;
mod timestamp;

pub use data_type::{DataType, ProjectionKind};
pub use error::{PacketDomainError, ParseDataTypeError, ParseProjectionKindError};
pub use ids::PacketId;
pub use packet::DataPacket;
pub use projection::{CodeInteractionRecord, ConversationRecord, Projection};
pub use timestamp::parse_packet_timestamp;
