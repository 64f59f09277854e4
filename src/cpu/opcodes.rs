//! Opcode Dispatch Tables
//!
//! Two parallel 256-entry tables (primary and CB-prefixed). Each entry
//! carries the decoded operation, the encoded length in bytes (opcode plus
//! operands), and whether the engine advances PC by that length after
//! execution. Entries with `update_pc == false` (jumps, calls, returns,
//! RST, the CB prefix byte, and the undefined-encoding trap) manage PC
//! themselves.
//!
//! The 11 undefined encodings decode to [`Op::Trap`], which locks the CPU
//! instead of executing as an accidental no-op.

use crate::common::Byte;

/// 8-bit operand: a register half or the byte addressed by HL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum R8 {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
    /// Memory operand addressed by HL
    HlInd,
}

/// 16-bit register pair operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum R16 {
    Af,
    Bc,
    De,
    Hl,
    Sp,
}

/// Indirection through a register pair for accumulator loads/stores,
/// with the post-increment/decrement HL variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ind {
    Bc,
    De,
    HlInc,
    HlDec,
}

/// Branch condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cond {
    Always,
    Nz,
    Z,
    Nc,
    C,
}

/// 8-bit accumulator arithmetic/logic operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

/// CB-prefixed rotate/shift operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

/// Decoded operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Nop,
    Stop,
    Halt,
    /// Undefined encoding; locks the CPU
    Trap,
    /// 0xCB: switch the next dispatch to the CB table
    Prefix,
    /// LD r, r'
    Ld(R8, R8),
    /// LD r, d8
    LdImm(R8),
    /// LD rr, d16
    LdPairImm(R16),
    /// LD (rr), A
    LdIndA(Ind),
    /// LD A, (rr)
    LdAInd(Ind),
    /// LD (a16), SP
    LdAbsSp,
    /// LD (a16), A
    LdAbsA,
    /// LD A, (a16)
    LdAAbs,
    /// LDH (a8), A
    LdhImmA,
    /// LDH A, (a8)
    LdhAImm,
    /// LD (0xFF00 + C), A
    LdhCA,
    /// LD A, (0xFF00 + C)
    LdhAC,
    /// LD SP, HL
    LdSpHl,
    /// LD HL, SP + r8
    LdHlSpOff,
    /// ADD SP, r8
    AddSp,
    /// ADD HL, rr
    AddHl(R16),
    IncPair(R16),
    DecPair(R16),
    Inc(R8),
    Dec(R8),
    Alu(AluOp, R8),
    /// Arithmetic/logic with a d8 operand
    AluImm(AluOp),
    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,
    Jr(Cond),
    Jp(Cond),
    JpHl,
    Call(Cond),
    Ret(Cond),
    Reti,
    Rst(Byte),
    Push(R16),
    Pop(R16),
    Di,
    Ei,
    // CB-prefixed operations
    Rot(RotOp, R8),
    Bit(u8, R8),
    Res(u8, R8),
    Set(u8, R8),
}

/// One dispatch-table entry
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    pub op: Op,
    /// Encoded length in bytes, opcode plus operands
    pub length: Byte,
    /// Whether the engine advances PC by `length` after execution
    pub update_pc: bool,
}

macro_rules! op {
    ($o:expr, $len:expr) => {
        Opcode { op: $o, length: $len, update_pc: true }
    };
    ($o:expr, $len:expr, pc) => {
        Opcode { op: $o, length: $len, update_pc: false }
    };
}

macro_rules! cb {
    (Bit, $r:ident, $n:expr) => {
        Opcode { op: Op::Bit($n, R8::$r), length: 1, update_pc: true }
    };
    (Res, $r:ident, $n:expr) => {
        Opcode { op: Op::Res($n, R8::$r), length: 1, update_pc: true }
    };
    (Set, $r:ident, $n:expr) => {
        Opcode { op: Op::Set($n, R8::$r), length: 1, update_pc: true }
    };
    ($rot:ident, $r:ident) => {
        Opcode { op: Op::Rot(RotOp::$rot, R8::$r), length: 1, update_pc: true }
    };
}

/// Primary dispatch table (256 entries)
#[rustfmt::skip]
pub static PRIMARY: [Opcode; 256] = [
    // 0x00 - 0x0F
    op!(Op::Nop, 1),                        // 0x00
    op!(Op::LdPairImm(R16::Bc), 3),         // 0x01
    op!(Op::LdIndA(Ind::Bc), 1),            // 0x02
    op!(Op::IncPair(R16::Bc), 1),           // 0x03
    op!(Op::Inc(R8::B), 1),                 // 0x04
    op!(Op::Dec(R8::B), 1),                 // 0x05
    op!(Op::LdImm(R8::B), 2),               // 0x06
    op!(Op::Rlca, 1),                       // 0x07
    op!(Op::LdAbsSp, 3),                    // 0x08
    op!(Op::AddHl(R16::Bc), 1),             // 0x09
    op!(Op::LdAInd(Ind::Bc), 1),            // 0x0A
    op!(Op::DecPair(R16::Bc), 1),           // 0x0B
    op!(Op::Inc(R8::C), 1),                 // 0x0C
    op!(Op::Dec(R8::C), 1),                 // 0x0D
    op!(Op::LdImm(R8::C), 2),               // 0x0E
    op!(Op::Rrca, 1),                       // 0x0F
    // 0x10 - 0x1F
    op!(Op::Stop, 2),                       // 0x10
    op!(Op::LdPairImm(R16::De), 3),         // 0x11
    op!(Op::LdIndA(Ind::De), 1),            // 0x12
    op!(Op::IncPair(R16::De), 1),           // 0x13
    op!(Op::Inc(R8::D), 1),                 // 0x14
    op!(Op::Dec(R8::D), 1),                 // 0x15
    op!(Op::LdImm(R8::D), 2),               // 0x16
    op!(Op::Rla, 1),                        // 0x17
    op!(Op::Jr(Cond::Always), 2, pc),       // 0x18
    op!(Op::AddHl(R16::De), 1),             // 0x19
    op!(Op::LdAInd(Ind::De), 1),            // 0x1A
    op!(Op::DecPair(R16::De), 1),           // 0x1B
    op!(Op::Inc(R8::E), 1),                 // 0x1C
    op!(Op::Dec(R8::E), 1),                 // 0x1D
    op!(Op::LdImm(R8::E), 2),               // 0x1E
    op!(Op::Rra, 1),                        // 0x1F
    // 0x20 - 0x2F
    op!(Op::Jr(Cond::Nz), 2, pc),           // 0x20
    op!(Op::LdPairImm(R16::Hl), 3),         // 0x21
    op!(Op::LdIndA(Ind::HlInc), 1),         // 0x22
    op!(Op::IncPair(R16::Hl), 1),           // 0x23
    op!(Op::Inc(R8::H), 1),                 // 0x24
    op!(Op::Dec(R8::H), 1),                 // 0x25
    op!(Op::LdImm(R8::H), 2),               // 0x26
    op!(Op::Daa, 1),                        // 0x27
    op!(Op::Jr(Cond::Z), 2, pc),            // 0x28
    op!(Op::AddHl(R16::Hl), 1),             // 0x29
    op!(Op::LdAInd(Ind::HlInc), 1),         // 0x2A
    op!(Op::DecPair(R16::Hl), 1),           // 0x2B
    op!(Op::Inc(R8::L), 1),                 // 0x2C
    op!(Op::Dec(R8::L), 1),                 // 0x2D
    op!(Op::LdImm(R8::L), 2),               // 0x2E
    op!(Op::Cpl, 1),                        // 0x2F
    // 0x30 - 0x3F
    op!(Op::Jr(Cond::Nc), 2, pc),           // 0x30
    op!(Op::LdPairImm(R16::Sp), 3),         // 0x31
    op!(Op::LdIndA(Ind::HlDec), 1),         // 0x32
    op!(Op::IncPair(R16::Sp), 1),           // 0x33
    op!(Op::Inc(R8::HlInd), 1),             // 0x34
    op!(Op::Dec(R8::HlInd), 1),             // 0x35
    op!(Op::LdImm(R8::HlInd), 2),           // 0x36
    op!(Op::Scf, 1),                        // 0x37
    op!(Op::Jr(Cond::C), 2, pc),            // 0x38
    op!(Op::AddHl(R16::Sp), 1),             // 0x39
    op!(Op::LdAInd(Ind::HlDec), 1),         // 0x3A
    op!(Op::DecPair(R16::Sp), 1),           // 0x3B
    op!(Op::Inc(R8::A), 1),                 // 0x3C
    op!(Op::Dec(R8::A), 1),                 // 0x3D
    op!(Op::LdImm(R8::A), 2),               // 0x3E
    op!(Op::Ccf, 1),                        // 0x3F
    // 0x40 - 0x4F
    op!(Op::Ld(R8::B, R8::B), 1),           // 0x40
    op!(Op::Ld(R8::B, R8::C), 1),           // 0x41
    op!(Op::Ld(R8::B, R8::D), 1),           // 0x42
    op!(Op::Ld(R8::B, R8::E), 1),           // 0x43
    op!(Op::Ld(R8::B, R8::H), 1),           // 0x44
    op!(Op::Ld(R8::B, R8::L), 1),           // 0x45
    op!(Op::Ld(R8::B, R8::HlInd), 1),       // 0x46
    op!(Op::Ld(R8::B, R8::A), 1),           // 0x47
    op!(Op::Ld(R8::C, R8::B), 1),           // 0x48
    op!(Op::Ld(R8::C, R8::C), 1),           // 0x49
    op!(Op::Ld(R8::C, R8::D), 1),           // 0x4A
    op!(Op::Ld(R8::C, R8::E), 1),           // 0x4B
    op!(Op::Ld(R8::C, R8::H), 1),           // 0x4C
    op!(Op::Ld(R8::C, R8::L), 1),           // 0x4D
    op!(Op::Ld(R8::C, R8::HlInd), 1),       // 0x4E
    op!(Op::Ld(R8::C, R8::A), 1),           // 0x4F
    // 0x50 - 0x5F
    op!(Op::Ld(R8::D, R8::B), 1),           // 0x50
    op!(Op::Ld(R8::D, R8::C), 1),           // 0x51
    op!(Op::Ld(R8::D, R8::D), 1),           // 0x52
    op!(Op::Ld(R8::D, R8::E), 1),           // 0x53
    op!(Op::Ld(R8::D, R8::H), 1),           // 0x54
    op!(Op::Ld(R8::D, R8::L), 1),           // 0x55
    op!(Op::Ld(R8::D, R8::HlInd), 1),       // 0x56
    op!(Op::Ld(R8::D, R8::A), 1),           // 0x57
    op!(Op::Ld(R8::E, R8::B), 1),           // 0x58
    op!(Op::Ld(R8::E, R8::C), 1),           // 0x59
    op!(Op::Ld(R8::E, R8::D), 1),           // 0x5A
    op!(Op::Ld(R8::E, R8::E), 1),           // 0x5B
    op!(Op::Ld(R8::E, R8::H), 1),           // 0x5C
    op!(Op::Ld(R8::E, R8::L), 1),           // 0x5D
    op!(Op::Ld(R8::E, R8::HlInd), 1),       // 0x5E
    op!(Op::Ld(R8::E, R8::A), 1),           // 0x5F
    // 0x60 - 0x6F
    op!(Op::Ld(R8::H, R8::B), 1),           // 0x60
    op!(Op::Ld(R8::H, R8::C), 1),           // 0x61
    op!(Op::Ld(R8::H, R8::D), 1),           // 0x62
    op!(Op::Ld(R8::H, R8::E), 1),           // 0x63
    op!(Op::Ld(R8::H, R8::H), 1),           // 0x64
    op!(Op::Ld(R8::H, R8::L), 1),           // 0x65
    op!(Op::Ld(R8::H, R8::HlInd), 1),       // 0x66
    op!(Op::Ld(R8::H, R8::A), 1),           // 0x67
    op!(Op::Ld(R8::L, R8::B), 1),           // 0x68
    op!(Op::Ld(R8::L, R8::C), 1),           // 0x69
    op!(Op::Ld(R8::L, R8::D), 1),           // 0x6A
    op!(Op::Ld(R8::L, R8::E), 1),           // 0x6B
    op!(Op::Ld(R8::L, R8::H), 1),           // 0x6C
    op!(Op::Ld(R8::L, R8::L), 1),           // 0x6D
    op!(Op::Ld(R8::L, R8::HlInd), 1),       // 0x6E
    op!(Op::Ld(R8::L, R8::A), 1),           // 0x6F
    // 0x70 - 0x7F
    op!(Op::Ld(R8::HlInd, R8::B), 1),       // 0x70
    op!(Op::Ld(R8::HlInd, R8::C), 1),       // 0x71
    op!(Op::Ld(R8::HlInd, R8::D), 1),       // 0x72
    op!(Op::Ld(R8::HlInd, R8::E), 1),       // 0x73
    op!(Op::Ld(R8::HlInd, R8::H), 1),       // 0x74
    op!(Op::Ld(R8::HlInd, R8::L), 1),       // 0x75
    op!(Op::Halt, 1),                       // 0x76
    op!(Op::Ld(R8::HlInd, R8::A), 1),       // 0x77
    op!(Op::Ld(R8::A, R8::B), 1),           // 0x78
    op!(Op::Ld(R8::A, R8::C), 1),           // 0x79
    op!(Op::Ld(R8::A, R8::D), 1),           // 0x7A
    op!(Op::Ld(R8::A, R8::E), 1),           // 0x7B
    op!(Op::Ld(R8::A, R8::H), 1),           // 0x7C
    op!(Op::Ld(R8::A, R8::L), 1),           // 0x7D
    op!(Op::Ld(R8::A, R8::HlInd), 1),       // 0x7E
    op!(Op::Ld(R8::A, R8::A), 1),           // 0x7F
    // 0x80 - 0x8F
    op!(Op::Alu(AluOp::Add, R8::B), 1),     // 0x80
    op!(Op::Alu(AluOp::Add, R8::C), 1),     // 0x81
    op!(Op::Alu(AluOp::Add, R8::D), 1),     // 0x82
    op!(Op::Alu(AluOp::Add, R8::E), 1),     // 0x83
    op!(Op::Alu(AluOp::Add, R8::H), 1),     // 0x84
    op!(Op::Alu(AluOp::Add, R8::L), 1),     // 0x85
    op!(Op::Alu(AluOp::Add, R8::HlInd), 1), // 0x86
    op!(Op::Alu(AluOp::Add, R8::A), 1),     // 0x87
    op!(Op::Alu(AluOp::Adc, R8::B), 1),     // 0x88
    op!(Op::Alu(AluOp::Adc, R8::C), 1),     // 0x89
    op!(Op::Alu(AluOp::Adc, R8::D), 1),     // 0x8A
    op!(Op::Alu(AluOp::Adc, R8::E), 1),     // 0x8B
    op!(Op::Alu(AluOp::Adc, R8::H), 1),     // 0x8C
    op!(Op::Alu(AluOp::Adc, R8::L), 1),     // 0x8D
    op!(Op::Alu(AluOp::Adc, R8::HlInd), 1), // 0x8E
    op!(Op::Alu(AluOp::Adc, R8::A), 1),     // 0x8F
    // 0x90 - 0x9F
    op!(Op::Alu(AluOp::Sub, R8::B), 1),     // 0x90
    op!(Op::Alu(AluOp::Sub, R8::C), 1),     // 0x91
    op!(Op::Alu(AluOp::Sub, R8::D), 1),     // 0x92
    op!(Op::Alu(AluOp::Sub, R8::E), 1),     // 0x93
    op!(Op::Alu(AluOp::Sub, R8::H), 1),     // 0x94
    op!(Op::Alu(AluOp::Sub, R8::L), 1),     // 0x95
    op!(Op::Alu(AluOp::Sub, R8::HlInd), 1), // 0x96
    op!(Op::Alu(AluOp::Sub, R8::A), 1),     // 0x97
    op!(Op::Alu(AluOp::Sbc, R8::B), 1),     // 0x98
    op!(Op::Alu(AluOp::Sbc, R8::C), 1),     // 0x99
    op!(Op::Alu(AluOp::Sbc, R8::D), 1),     // 0x9A
    op!(Op::Alu(AluOp::Sbc, R8::E), 1),     // 0x9B
    op!(Op::Alu(AluOp::Sbc, R8::H), 1),     // 0x9C
    op!(Op::Alu(AluOp::Sbc, R8::L), 1),     // 0x9D
    op!(Op::Alu(AluOp::Sbc, R8::HlInd), 1), // 0x9E
    op!(Op::Alu(AluOp::Sbc, R8::A), 1),     // 0x9F
    // 0xA0 - 0xAF
    op!(Op::Alu(AluOp::And, R8::B), 1),     // 0xA0
    op!(Op::Alu(AluOp::And, R8::C), 1),     // 0xA1
    op!(Op::Alu(AluOp::And, R8::D), 1),     // 0xA2
    op!(Op::Alu(AluOp::And, R8::E), 1),     // 0xA3
    op!(Op::Alu(AluOp::And, R8::H), 1),     // 0xA4
    op!(Op::Alu(AluOp::And, R8::L), 1),     // 0xA5
    op!(Op::Alu(AluOp::And, R8::HlInd), 1), // 0xA6
    op!(Op::Alu(AluOp::And, R8::A), 1),     // 0xA7
    op!(Op::Alu(AluOp::Xor, R8::B), 1),     // 0xA8
    op!(Op::Alu(AluOp::Xor, R8::C), 1),     // 0xA9
    op!(Op::Alu(AluOp::Xor, R8::D), 1),     // 0xAA
    op!(Op::Alu(AluOp::Xor, R8::E), 1),     // 0xAB
    op!(Op::Alu(AluOp::Xor, R8::H), 1),     // 0xAC
    op!(Op::Alu(AluOp::Xor, R8::L), 1),     // 0xAD
    op!(Op::Alu(AluOp::Xor, R8::HlInd), 1), // 0xAE
    op!(Op::Alu(AluOp::Xor, R8::A), 1),     // 0xAF
    // 0xB0 - 0xBF
    op!(Op::Alu(AluOp::Or, R8::B), 1),      // 0xB0
    op!(Op::Alu(AluOp::Or, R8::C), 1),      // 0xB1
    op!(Op::Alu(AluOp::Or, R8::D), 1),      // 0xB2
    op!(Op::Alu(AluOp::Or, R8::E), 1),      // 0xB3
    op!(Op::Alu(AluOp::Or, R8::H), 1),      // 0xB4
    op!(Op::Alu(AluOp::Or, R8::L), 1),      // 0xB5
    op!(Op::Alu(AluOp::Or, R8::HlInd), 1),  // 0xB6
    op!(Op::Alu(AluOp::Or, R8::A), 1),      // 0xB7
    op!(Op::Alu(AluOp::Cp, R8::B), 1),      // 0xB8
    op!(Op::Alu(AluOp::Cp, R8::C), 1),      // 0xB9
    op!(Op::Alu(AluOp::Cp, R8::D), 1),      // 0xBA
    op!(Op::Alu(AluOp::Cp, R8::E), 1),      // 0xBB
    op!(Op::Alu(AluOp::Cp, R8::H), 1),      // 0xBC
    op!(Op::Alu(AluOp::Cp, R8::L), 1),      // 0xBD
    op!(Op::Alu(AluOp::Cp, R8::HlInd), 1),  // 0xBE
    op!(Op::Alu(AluOp::Cp, R8::A), 1),      // 0xBF
    // 0xC0 - 0xCF
    op!(Op::Ret(Cond::Nz), 1, pc),          // 0xC0
    op!(Op::Pop(R16::Bc), 1),               // 0xC1
    op!(Op::Jp(Cond::Nz), 3, pc),           // 0xC2
    op!(Op::Jp(Cond::Always), 3, pc),       // 0xC3
    op!(Op::Call(Cond::Nz), 3, pc),         // 0xC4
    op!(Op::Push(R16::Bc), 1),              // 0xC5
    op!(Op::AluImm(AluOp::Add), 2),         // 0xC6
    op!(Op::Rst(0x00), 1, pc),              // 0xC7
    op!(Op::Ret(Cond::Z), 1, pc),           // 0xC8
    op!(Op::Ret(Cond::Always), 1, pc),      // 0xC9
    op!(Op::Jp(Cond::Z), 3, pc),            // 0xCA
    op!(Op::Prefix, 1, pc),                 // 0xCB
    op!(Op::Call(Cond::Z), 3, pc),          // 0xCC
    op!(Op::Call(Cond::Always), 3, pc),     // 0xCD
    op!(Op::AluImm(AluOp::Adc), 2),         // 0xCE
    op!(Op::Rst(0x08), 1, pc),              // 0xCF
    // 0xD0 - 0xDF
    op!(Op::Ret(Cond::Nc), 1, pc),          // 0xD0
    op!(Op::Pop(R16::De), 1),               // 0xD1
    op!(Op::Jp(Cond::Nc), 3, pc),           // 0xD2
    op!(Op::Trap, 1, pc),                   // 0xD3
    op!(Op::Call(Cond::Nc), 3, pc),         // 0xD4
    op!(Op::Push(R16::De), 1),              // 0xD5
    op!(Op::AluImm(AluOp::Sub), 2),         // 0xD6
    op!(Op::Rst(0x10), 1, pc),              // 0xD7
    op!(Op::Ret(Cond::C), 1, pc),           // 0xD8
    op!(Op::Reti, 1, pc),                   // 0xD9
    op!(Op::Jp(Cond::C), 3, pc),            // 0xDA
    op!(Op::Trap, 1, pc),                   // 0xDB
    op!(Op::Call(Cond::C), 3, pc),          // 0xDC
    op!(Op::Trap, 1, pc),                   // 0xDD
    op!(Op::AluImm(AluOp::Sbc), 2),         // 0xDE
    op!(Op::Rst(0x18), 1, pc),              // 0xDF
    // 0xE0 - 0xEF
    op!(Op::LdhImmA, 2),                    // 0xE0
    op!(Op::Pop(R16::Hl), 1),               // 0xE1
    op!(Op::LdhCA, 1),                      // 0xE2
    op!(Op::Trap, 1, pc),                   // 0xE3
    op!(Op::Trap, 1, pc),                   // 0xE4
    op!(Op::Push(R16::Hl), 1),              // 0xE5
    op!(Op::AluImm(AluOp::And), 2),         // 0xE6
    op!(Op::Rst(0x20), 1, pc),              // 0xE7
    op!(Op::AddSp, 2),                      // 0xE8
    op!(Op::JpHl, 1, pc),                   // 0xE9
    op!(Op::LdAbsA, 3),                     // 0xEA
    op!(Op::Trap, 1, pc),                   // 0xEB
    op!(Op::Trap, 1, pc),                   // 0xEC
    op!(Op::Trap, 1, pc),                   // 0xED
    op!(Op::AluImm(AluOp::Xor), 2),         // 0xEE
    op!(Op::Rst(0x28), 1, pc),              // 0xEF
    // 0xF0 - 0xFF
    op!(Op::LdhAImm, 2),                    // 0xF0
    op!(Op::Pop(R16::Af), 1),               // 0xF1
    op!(Op::LdhAC, 1),                      // 0xF2
    op!(Op::Di, 1),                         // 0xF3
    op!(Op::Trap, 1, pc),                   // 0xF4
    op!(Op::Push(R16::Af), 1),              // 0xF5
    op!(Op::AluImm(AluOp::Or), 2),          // 0xF6
    op!(Op::Rst(0x30), 1, pc),              // 0xF7
    op!(Op::LdHlSpOff, 2),                  // 0xF8
    op!(Op::LdSpHl, 1),                     // 0xF9
    op!(Op::LdAAbs, 3),                     // 0xFA
    op!(Op::Ei, 1),                         // 0xFB
    op!(Op::Trap, 1, pc),                   // 0xFC
    op!(Op::Trap, 1, pc),                   // 0xFD
    op!(Op::AluImm(AluOp::Cp), 2),          // 0xFE
    op!(Op::Rst(0x38), 1, pc),              // 0xFF
];

/// CB-prefixed dispatch table (256 entries); every sub-opcode is one byte
#[rustfmt::skip]
pub static CB_PREFIXED: [Opcode; 256] = [
    // 0x00 - 0x07: RLC r
    cb!(Rlc, B), cb!(Rlc, C), cb!(Rlc, D), cb!(Rlc, E),
    cb!(Rlc, H), cb!(Rlc, L), cb!(Rlc, HlInd), cb!(Rlc, A),
    // 0x08 - 0x0F: RRC r
    cb!(Rrc, B), cb!(Rrc, C), cb!(Rrc, D), cb!(Rrc, E),
    cb!(Rrc, H), cb!(Rrc, L), cb!(Rrc, HlInd), cb!(Rrc, A),
    // 0x10 - 0x17: RL r
    cb!(Rl, B), cb!(Rl, C), cb!(Rl, D), cb!(Rl, E),
    cb!(Rl, H), cb!(Rl, L), cb!(Rl, HlInd), cb!(Rl, A),
    // 0x18 - 0x1F: RR r
    cb!(Rr, B), cb!(Rr, C), cb!(Rr, D), cb!(Rr, E),
    cb!(Rr, H), cb!(Rr, L), cb!(Rr, HlInd), cb!(Rr, A),
    // 0x20 - 0x27: SLA r
    cb!(Sla, B), cb!(Sla, C), cb!(Sla, D), cb!(Sla, E),
    cb!(Sla, H), cb!(Sla, L), cb!(Sla, HlInd), cb!(Sla, A),
    // 0x28 - 0x2F: SRA r
    cb!(Sra, B), cb!(Sra, C), cb!(Sra, D), cb!(Sra, E),
    cb!(Sra, H), cb!(Sra, L), cb!(Sra, HlInd), cb!(Sra, A),
    // 0x30 - 0x37: SWAP r
    cb!(Swap, B), cb!(Swap, C), cb!(Swap, D), cb!(Swap, E),
    cb!(Swap, H), cb!(Swap, L), cb!(Swap, HlInd), cb!(Swap, A),
    // 0x38 - 0x3F: SRL r
    cb!(Srl, B), cb!(Srl, C), cb!(Srl, D), cb!(Srl, E),
    cb!(Srl, H), cb!(Srl, L), cb!(Srl, HlInd), cb!(Srl, A),
    // 0x40 - 0x47: BIT 0,r
    cb!(Bit, B, 0), cb!(Bit, C, 0), cb!(Bit, D, 0), cb!(Bit, E, 0),
    cb!(Bit, H, 0), cb!(Bit, L, 0), cb!(Bit, HlInd, 0), cb!(Bit, A, 0),
    // 0x48 - 0x4F: BIT 1,r
    cb!(Bit, B, 1), cb!(Bit, C, 1), cb!(Bit, D, 1), cb!(Bit, E, 1),
    cb!(Bit, H, 1), cb!(Bit, L, 1), cb!(Bit, HlInd, 1), cb!(Bit, A, 1),
    // 0x50 - 0x57: BIT 2,r
    cb!(Bit, B, 2), cb!(Bit, C, 2), cb!(Bit, D, 2), cb!(Bit, E, 2),
    cb!(Bit, H, 2), cb!(Bit, L, 2), cb!(Bit, HlInd, 2), cb!(Bit, A, 2),
    // 0x58 - 0x5F: BIT 3,r
    cb!(Bit, B, 3), cb!(Bit, C, 3), cb!(Bit, D, 3), cb!(Bit, E, 3),
    cb!(Bit, H, 3), cb!(Bit, L, 3), cb!(Bit, HlInd, 3), cb!(Bit, A, 3),
    // 0x60 - 0x67: BIT 4,r
    cb!(Bit, B, 4), cb!(Bit, C, 4), cb!(Bit, D, 4), cb!(Bit, E, 4),
    cb!(Bit, H, 4), cb!(Bit, L, 4), cb!(Bit, HlInd, 4), cb!(Bit, A, 4),
    // 0x68 - 0x6F: BIT 5,r
    cb!(Bit, B, 5), cb!(Bit, C, 5), cb!(Bit, D, 5), cb!(Bit, E, 5),
    cb!(Bit, H, 5), cb!(Bit, L, 5), cb!(Bit, HlInd, 5), cb!(Bit, A, 5),
    // 0x70 - 0x77: BIT 6,r
    cb!(Bit, B, 6), cb!(Bit, C, 6), cb!(Bit, D, 6), cb!(Bit, E, 6),
    cb!(Bit, H, 6), cb!(Bit, L, 6), cb!(Bit, HlInd, 6), cb!(Bit, A, 6),
    // 0x78 - 0x7F: BIT 7,r
    cb!(Bit, B, 7), cb!(Bit, C, 7), cb!(Bit, D, 7), cb!(Bit, E, 7),
    cb!(Bit, H, 7), cb!(Bit, L, 7), cb!(Bit, HlInd, 7), cb!(Bit, A, 7),
    // 0x80 - 0x87: RES 0,r
    cb!(Res, B, 0), cb!(Res, C, 0), cb!(Res, D, 0), cb!(Res, E, 0),
    cb!(Res, H, 0), cb!(Res, L, 0), cb!(Res, HlInd, 0), cb!(Res, A, 0),
    // 0x88 - 0x8F: RES 1,r
    cb!(Res, B, 1), cb!(Res, C, 1), cb!(Res, D, 1), cb!(Res, E, 1),
    cb!(Res, H, 1), cb!(Res, L, 1), cb!(Res, HlInd, 1), cb!(Res, A, 1),
    // 0x90 - 0x97: RES 2,r
    cb!(Res, B, 2), cb!(Res, C, 2), cb!(Res, D, 2), cb!(Res, E, 2),
    cb!(Res, H, 2), cb!(Res, L, 2), cb!(Res, HlInd, 2), cb!(Res, A, 2),
    // 0x98 - 0x9F: RES 3,r
    cb!(Res, B, 3), cb!(Res, C, 3), cb!(Res, D, 3), cb!(Res, E, 3),
    cb!(Res, H, 3), cb!(Res, L, 3), cb!(Res, HlInd, 3), cb!(Res, A, 3),
    // 0xA0 - 0xA7: RES 4,r
    cb!(Res, B, 4), cb!(Res, C, 4), cb!(Res, D, 4), cb!(Res, E, 4),
    cb!(Res, H, 4), cb!(Res, L, 4), cb!(Res, HlInd, 4), cb!(Res, A, 4),
    // 0xA8 - 0xAF: RES 5,r
    cb!(Res, B, 5), cb!(Res, C, 5), cb!(Res, D, 5), cb!(Res, E, 5),
    cb!(Res, H, 5), cb!(Res, L, 5), cb!(Res, HlInd, 5), cb!(Res, A, 5),
    // 0xB0 - 0xB7: RES 6,r
    cb!(Res, B, 6), cb!(Res, C, 6), cb!(Res, D, 6), cb!(Res, E, 6),
    cb!(Res, H, 6), cb!(Res, L, 6), cb!(Res, HlInd, 6), cb!(Res, A, 6),
    // 0xB8 - 0xBF: RES 7,r
    cb!(Res, B, 7), cb!(Res, C, 7), cb!(Res, D, 7), cb!(Res, E, 7),
    cb!(Res, H, 7), cb!(Res, L, 7), cb!(Res, HlInd, 7), cb!(Res, A, 7),
    // 0xC0 - 0xC7: SET 0,r
    cb!(Set, B, 0), cb!(Set, C, 0), cb!(Set, D, 0), cb!(Set, E, 0),
    cb!(Set, H, 0), cb!(Set, L, 0), cb!(Set, HlInd, 0), cb!(Set, A, 0),
    // 0xC8 - 0xCF: SET 1,r
    cb!(Set, B, 1), cb!(Set, C, 1), cb!(Set, D, 1), cb!(Set, E, 1),
    cb!(Set, H, 1), cb!(Set, L, 1), cb!(Set, HlInd, 1), cb!(Set, A, 1),
    // 0xD0 - 0xD7: SET 2,r
    cb!(Set, B, 2), cb!(Set, C, 2), cb!(Set, D, 2), cb!(Set, E, 2),
    cb!(Set, H, 2), cb!(Set, L, 2), cb!(Set, HlInd, 2), cb!(Set, A, 2),
    // 0xD8 - 0xDF: SET 3,r
    cb!(Set, B, 3), cb!(Set, C, 3), cb!(Set, D, 3), cb!(Set, E, 3),
    cb!(Set, H, 3), cb!(Set, L, 3), cb!(Set, HlInd, 3), cb!(Set, A, 3),
    // 0xE0 - 0xE7: SET 4,r
    cb!(Set, B, 4), cb!(Set, C, 4), cb!(Set, D, 4), cb!(Set, E, 4),
    cb!(Set, H, 4), cb!(Set, L, 4), cb!(Set, HlInd, 4), cb!(Set, A, 4),
    // 0xE8 - 0xEF: SET 5,r
    cb!(Set, B, 5), cb!(Set, C, 5), cb!(Set, D, 5), cb!(Set, E, 5),
    cb!(Set, H, 5), cb!(Set, L, 5), cb!(Set, HlInd, 5), cb!(Set, A, 5),
    // 0xF0 - 0xF7: SET 6,r
    cb!(Set, B, 6), cb!(Set, C, 6), cb!(Set, D, 6), cb!(Set, E, 6),
    cb!(Set, H, 6), cb!(Set, L, 6), cb!(Set, HlInd, 6), cb!(Set, A, 6),
    // 0xF8 - 0xFF: SET 7,r
    cb!(Set, B, 7), cb!(Set, C, 7), cb!(Set, D, 7), cb!(Set, E, 7),
    cb!(Set, H, 7), cb!(Set, L, 7), cb!(Set, HlInd, 7), cb!(Set, A, 7),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_table_spot_checks() {
        assert_eq!(PRIMARY[0x00].op, Op::Nop);
        assert_eq!(PRIMARY[0x00].length, 1);
        assert!(PRIMARY[0x00].update_pc);

        assert_eq!(PRIMARY[0x01].op, Op::LdPairImm(R16::Bc));
        assert_eq!(PRIMARY[0x01].length, 3);

        assert_eq!(PRIMARY[0x06].op, Op::LdImm(R8::B));
        assert_eq!(PRIMARY[0x06].length, 2);

        assert_eq!(PRIMARY[0x76].op, Op::Halt);
        assert_eq!(PRIMARY[0xCB].op, Op::Prefix);
        assert!(!PRIMARY[0xCB].update_pc);
    }

    #[test]
    fn test_control_flow_manages_pc() {
        for opcode in [0x18, 0x20, 0xC0, 0xC3, 0xC7, 0xC9, 0xCD, 0xD9, 0xE9] {
            assert!(
                !PRIMARY[opcode].update_pc,
                "opcode {:#04X} should manage PC itself",
                opcode
            );
        }
    }

    #[test]
    fn test_undefined_encodings_trap() {
        let traps: Vec<usize> = (0..256usize)
            .filter(|&i| PRIMARY[i].op == Op::Trap)
            .collect();
        assert_eq!(
            traps,
            vec![0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD]
        );
    }

    #[test]
    fn test_cb_table_shape() {
        for (i, entry) in CB_PREFIXED.iter().enumerate() {
            assert_eq!(entry.length, 1, "CB {:#04X}", i);
            assert!(entry.update_pc, "CB {:#04X}", i);
        }

        assert_eq!(CB_PREFIXED[0x00].op, Op::Rot(RotOp::Rlc, R8::B));
        assert_eq!(CB_PREFIXED[0x11].op, Op::Rot(RotOp::Rl, R8::C));
        assert_eq!(CB_PREFIXED[0x37].op, Op::Rot(RotOp::Swap, R8::A));
        assert_eq!(CB_PREFIXED[0x46].op, Op::Bit(0, R8::HlInd));
        assert_eq!(CB_PREFIXED[0x80].op, Op::Res(0, R8::B));
        assert_eq!(CB_PREFIXED[0xFF].op, Op::Set(7, R8::A));
    }
}
