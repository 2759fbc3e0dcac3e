//! The messaging stack and its CloudFormation template.

use serde_json::{json, Map, Value};

use super::context::MessagingContext;
use super::environment::ApplicationEnvironment;
use super::errors::InfraError;
use super::table::DynamoDbTable;

pub const MESSAGING_STACK_ID: &str = "messaging";

/// Base name of the breadcrumbs table before environment prefixing.
pub const BREADCRUMBS_TABLE_NAME: &str = "breadcrumbs";

/// Stack holding the tables that back the messaging application.
#[derive(Debug, Clone)]
pub struct MessagingStack {
    account_id: String,
    region: String,
    environment: ApplicationEnvironment,
    tables: Vec<DynamoDbTable>,
}

impl MessagingStack {
    /// Defines the stack for a context, including the breadcrumbs table.
    pub fn new(context: &MessagingContext) -> Result<Self, InfraError> {
        let environment = context.application_environment();
        let breadcrumbs =
            DynamoDbTable::new("BreadcrumbsDynamoDbTable", &environment, BREADCRUMBS_TABLE_NAME)?;

        Ok(Self {
            account_id: context.account_id.clone(),
            region: context.region.clone(),
            environment,
            tables: vec![breadcrumbs],
        })
    }

    /// Stack name as deployed, e.g. `staging-todo-app-messaging`.
    pub fn stack_name(&self) -> String {
        self.environment.prefix(MESSAGING_STACK_ID)
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn tables(&self) -> &[DynamoDbTable] {
        &self.tables
    }

    /// Renders the CloudFormation template.
    pub fn synth(&self) -> Value {
        let resources: Map<String, Value> = self
            .tables
            .iter()
            .map(|t| (t.logical_id().to_string(), t.to_resource()))
            .collect();

        json!({
            "Description": format!("Messaging stack for {}", self.environment),
            "Metadata": {
                "StackName": self.stack_name(),
                "Account": self.account_id,
                "Region": self.region
            },
            "Resources": resources
        })
    }
}
