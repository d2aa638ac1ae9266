// Create the Error, ErrorKind, ResultExt, and Result types
// Result is a typedef of std `Result` with the error type our own `Error`
// ResultExt adds the `chain_err` trait method.
error_chain! {

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        InvalidDimensions(width: usize, length: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}, width and length must both be at least 1",
                    width, length)
        }
        InvalidStartCoordinate(x: u32, y: u32) {
            description("start coordinate outside of the maze")
            display("start coordinate ({}, {}) is outside of the maze", x, y)
        }
        BacktrackExhausted(visited: usize, total: usize) {
            description("maze carving ran out of cells to backtrack to")
            display("maze carving ran out of cells to backtrack to after visiting {} of {} cells",
                    visited, total)
        }
    }
}
