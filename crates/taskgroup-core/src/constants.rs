//! Shared constants: column names, env vars, and compiled defaults.

/// Input column holding the order identifier.
pub const COLUMN_ORDER_ID: &str = "オーダーID";
/// Input column holding the company name (grouping key).
pub const COLUMN_COMPANY: &str = "会社名";
/// Input column holding the raw task name (clustering subject).
pub const COLUMN_TASK_NAME: &str = "作業名称";
/// Output column for the company-local cluster id.
pub const COLUMN_CLUSTER_ID: &str = "クラスタID";
/// Output column for the representative task name.
pub const COLUMN_REPRESENTATIVE: &str = "代表名";

/// Columns every input file must carry, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 3] = [COLUMN_ORDER_ID, COLUMN_COMPANY, COLUMN_TASK_NAME];

/// Env var holding the tracing filter directive.
pub const ENV_LOG: &str = "TASKGROUP_LOG";
pub const ENV_INPUT: &str = "TASKGROUP_INPUT";
pub const ENV_OUTPUT_FOLDER: &str = "TASKGROUP_OUTPUT_FOLDER";
pub const ENV_OUTPUT_PREFIX: &str = "TASKGROUP_OUTPUT_PREFIX";

/// Default tracing filter when neither `TASKGROUP_LOG` nor `logging.level` is set.
pub const DEFAULT_LOG_FILTER: &str = "taskgroup=info";

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_INPUT_FOLDER: &str = "input";
pub const DEFAULT_OUTPUT_FOLDER: &str = "output";
pub const DEFAULT_OUTPUT_PREFIX: &str = "clustered_tasks";
