#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use gitgen::llm::{JsonRequest, LanguageModel, LlmError};
use gitgen::model::Provider;
use gitgen::process::{CommandExecutor, CommandOutput};
use parking_lot::Mutex;

pub const DIFF: &str = "diff --git a/package.json b/package.json
index 1111111..2222222 100644
--- a/package.json
+++ b/package.json
@@ -1,3 +1,3 @@
 {
-  \"version\": \"1.0.0\"
+  \"version\": \"1.1.0\"
 }
diff --git a/src/helper.ts b/src/helper.ts
index 3333333..4444444 100644
--- a/src/helper.ts
+++ b/src/helper.ts
@@ -10,3 +10,3 @@
 export function helper() {
-  return \"old\";
+  return \"new\";
 }";

pub const LOG: &str = "a1b2c3d4e5f6a7b8c9d0a1b2c3d4e5f6a7b8c9d0
a1b2c3d
feat(cli): add changelog command

Jane Doe
2025-01-02 10:00:00 +0100
---COMMIT-END---
";

/// A recorded subprocess invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
  pub program: String,
  pub args:    Vec<String>
}

impl Call {
  pub fn starts_with(&self, program: &str, prefix: &[&str]) -> bool {
    self.program == program && self.args.len() >= prefix.len() && self.args.iter().zip(prefix).all(|(arg, expected)| arg == expected)
  }
}

struct Rule {
  program: String,
  prefix:  Vec<String>,
  output:  CommandOutput
}

/// Executor answering from scripted rules; the first rule whose program and
/// argument prefix match wins. Unmatched commands fail with exit code 127.
#[derive(Clone, Default)]
pub struct ScriptedExecutor {
  rules: Arc<Mutex<Vec<Rule>>>,
  calls: Arc<Mutex<Vec<Call>>>
}

impl ScriptedExecutor {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn on(self, program: &str, prefix: &[&str], output: CommandOutput) -> Self {
    self.rules.lock().push(Rule {
      program: program.to_string(),
      prefix: prefix.iter().map(|arg| arg.to_string()).collect(),
      output
    });
    self
  }

  pub fn calls(&self) -> Vec<Call> {
    self.calls.lock().clone()
  }

  pub fn find_call(&self, program: &str, prefix: &[&str]) -> Option<Call> {
    self.calls().into_iter().find(|call| call.starts_with(program, prefix))
  }

  pub fn position(&self, program: &str, prefix: &[&str]) -> Option<usize> {
    self.calls().iter().position(|call| call.starts_with(program, prefix))
  }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
  async fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
    self.calls.lock().push(Call { program: program.to_string(), args: args.to_vec() });

    let rules = self.rules.lock();
    let output = rules
      .iter()
      .find(|rule| rule.program == program && args.starts_with(&rule.prefix))
      .map(|rule| rule.output.clone())
      .unwrap_or_else(|| CommandOutput::failure(127, format!("unexpected command: {program} {}", args.join(" "))));

    Ok(output)
  }
}

/// Language model answering with canned JSON per schema name.
#[derive(Clone, Default)]
pub struct MockModel {
  responses: Arc<Mutex<HashMap<&'static str, String>>>,
  requests:  Arc<Mutex<Vec<JsonRequest>>>
}

impl MockModel {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn respond(self, schema_name: &'static str, json: impl Into<String>) -> Self {
    self.responses.lock().insert(schema_name, json.into());
    self
  }

  pub fn requests(&self) -> Vec<JsonRequest> {
    self.requests.lock().clone()
  }

  pub fn last_prompt(&self) -> String {
    self.requests().last().map(|request| request.prompt.clone()).unwrap_or_default()
  }
}

#[async_trait]
impl LanguageModel for MockModel {
  async fn generate_json(&self, request: &JsonRequest) -> Result<String, LlmError> {
    self.requests.lock().push(request.clone());

    self.responses.lock().get(request.schema_name).cloned().ok_or(LlmError::Api {
      provider: Provider::Google,
      status:   500,
      message:  format!("no canned response for {}", request.schema_name)
    })
  }
}
