//! One-shot concurrent portfolio assembly

pub mod portfolio_assembler;

pub use portfolio_assembler::PortfolioAssembler;
