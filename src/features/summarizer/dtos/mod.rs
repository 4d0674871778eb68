pub mod summary_dto;

pub use summary_dto::SummaryResponseDto;
