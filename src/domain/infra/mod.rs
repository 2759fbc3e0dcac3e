//! Infrastructure definitions for the messaging application.
//!
//! Describes the AWS resources the relay's application relies on and
//! renders them as a CloudFormation template. Nothing here talks to AWS.

mod context;
mod environment;
mod errors;
mod stack;
mod table;

pub use context::MessagingContext;
pub use environment::ApplicationEnvironment;
pub use errors::InfraError;
pub use stack::{MessagingStack, BREADCRUMBS_TABLE_NAME, MESSAGING_STACK_ID};
pub use table::{DynamoDbTable, DEFAULT_CAPACITY_UNITS};
