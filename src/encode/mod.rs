mod assemble;
mod command;

pub use assemble::{assemble_tile, lines_layer, points_layer};
pub use command::{decode_geometry, unzigzag, zigzag, Command, GeometryEncoder, CMD_BITS};
