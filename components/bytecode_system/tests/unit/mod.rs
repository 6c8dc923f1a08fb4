//! Unit test runner for bytecode_system

mod test_chunk;
mod test_instruction;
mod test_opcode;
mod test_optimizer;
