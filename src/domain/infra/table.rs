//! DynamoDB table definition.

use serde_json::{json, Value};

use super::environment::ApplicationEnvironment;
use super::errors::InfraError;

/// Provisioned capacity used when none is given.
pub const DEFAULT_CAPACITY_UNITS: u32 = 10;

/// A DynamoDB table keyed by a string `id`.
///
/// Encrypted with the AWS managed key, billed on provisioned capacity and
/// deleted together with its stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamoDbTable {
    logical_id: String,
    table_name: String,
    partition_key: String,
    read_capacity: u32,
    write_capacity: u32,
}

impl DynamoDbTable {
    /// Defines a table whose name is prefixed with the application
    /// environment.
    pub fn new(
        logical_id: impl Into<String>,
        environment: &ApplicationEnvironment,
        table_name: &str,
    ) -> Result<Self, InfraError> {
        if table_name.trim().is_empty() {
            return Err(InfraError::EmptyTableName);
        }
        Ok(Self {
            logical_id: logical_id.into(),
            table_name: environment.prefix(table_name),
            partition_key: "id".to_string(),
            read_capacity: DEFAULT_CAPACITY_UNITS,
            write_capacity: DEFAULT_CAPACITY_UNITS,
        })
    }

    pub fn with_capacity(mut self, read: u32, write: u32) -> Result<Self, InfraError> {
        for units in [read, write] {
            if units == 0 {
                return Err(InfraError::InvalidCapacity(units));
            }
        }
        self.read_capacity = read;
        self.write_capacity = write;
        Ok(self)
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    /// Renders the `AWS::DynamoDB::Table` resource.
    pub fn to_resource(&self) -> Value {
        json!({
            "Type": "AWS::DynamoDB::Table",
            "Properties": {
                "TableName": self.table_name,
                "KeySchema": [
                    { "AttributeName": self.partition_key, "KeyType": "HASH" }
                ],
                "AttributeDefinitions": [
                    { "AttributeName": self.partition_key, "AttributeType": "S" }
                ],
                "ProvisionedThroughput": {
                    "ReadCapacityUnits": self.read_capacity,
                    "WriteCapacityUnits": self.write_capacity
                },
                "SSESpecification": { "SSEEnabled": true }
            },
            "UpdateReplacePolicy": "Delete",
            "DeletionPolicy": "Delete"
        })
    }
}
