//! careerfit-core: the career-fit assessment engine.
//!
//! Questions live in a versioned [`catalog::QuestionCatalog`]; answers go into
//! a [`responses::ResponseStore`]; [`scoring`] turns them into one score per
//! dimension, [`aggregate`] folds those into an overall score and
//! recommendation, and [`report`] assembles the final report.
//! [`session::AssessmentSession`] ties these together behind the linear
//! [`flow`] of quiz stages.

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod error;
pub mod flow;
pub mod model;
pub mod parser;
pub mod report;
pub mod responses;
pub mod scoring;
pub mod session;

pub use error::AssessmentError;
