//! Prompt templates for each generation task.

use crate::git::GitCommit;

const CONVENTIONAL_TITLE_RULES: &str = "- Follow the Conventional Commits format `type(scope): subject`.
  - `type` is one of `feat`, `fix`, `improvement`, `refactor`, `perf`, `docs`, `style`, `test`, `build`, `ci`, `ops`, `chore`, `revert`, `security` or `deprecate`.
  - `scope` is optional. Derive it from the feature or area the file paths point to (`auth`, `billing`, `cli`) and avoid vague scopes such as `server` or `client`.
  - `subject` is a short imperative summary of the most significant change. Prefer a precise verb over `update` or `improve`.";

/// Renders the optional user context as its own prompt section.
fn context_section(context: Option<&str>) -> String {
  match context.map(str::trim).filter(|ctx| !ctx.is_empty()) {
    Some(ctx) => format!(
      "\n## User-Provided Context\n\nThe user supplied the following context. Use it to steer the result toward their intent:\n\n> {ctx}\n"
    ),
    None => String::new()
  }
}

pub fn pr_details_prompt(diff: &str, context: Option<&str>) -> String {
  format!(
    "You are a senior software engineer preparing a pull request. Read the git diff below and write a PR title and description that will also serve as the squashed commit message.
{context}
Keep it succinct but complete.

## Title
{CONVENTIONAL_TITLE_RULES}

## Description
- Open with a short paragraph on why the change exists: the problem solved or the capability added.
- Add a `Changes:` heading followed by bullets that describe the work conceptually. Group related edits together instead of listing files.
- Finish with a `How to Test / What to Expect` section describing the previous behaviour and what reviewers should now observe.

## Constraints
- Professional, direct tone.
- No emojis.
- Never start the title with phrases like \"This PR\" or \"This commit\".

## Output (JSON)
- `title`: the PR title.
- `description`: the body, including the `Changes:` list.
- `fileSummaries`: one entry per file with `file` (the path) and `description` (one sentence on what changed in it).

## Diff
{diff}",
    context = context_section(context)
  )
}

pub fn commit_message_prompt(diff: &str, context: Option<&str>) -> String {
  format!(
    "You are a senior software engineer writing a git commit message for the staged changes below.
{context}
## Rules
{CONVENTIONAL_TITLE_RULES}
- Keep the subject line under 72 characters, in the imperative mood, without a trailing period.
- Add a body only when the change needs explanation. Separate it from the subject with a blank line and wrap it at 72 characters.
- Use the body to explain why the change was made. The diff already shows how.
- Mention breaking changes in a `BREAKING CHANGE:` footer.
- No emojis and no filler such as \"This commit\".

## Output (JSON)
- `message`: the full commit message.

## Diff
{diff}",
    context = context_section(context)
  )
}

pub fn title_prompt(diff: &str, context: Option<&str>) -> String {
  format!(
    "You are a senior software engineer naming a pull request. Read the git diff below and write a single-line title.
{context}
## Rules
{CONVENTIONAL_TITLE_RULES}
- No emojis and no phrases like \"This PR\".

## Output (JSON)
- `title`: the PR title.

## Diff
{diff}",
    context = context_section(context)
  )
}

pub fn review_prompt(diff: &str, context: Option<&str>) -> String {
  format!(
    "You are a meticulous code reviewer. Review the git diff below and report concrete, actionable findings.
{context}
## Focus
- Security vulnerabilities.
- Bugs and logic errors.
- Performance and resource usage.
- Structure, readability and maintainability.

## Constraints
- No praise. Only report problems or clear improvements.
- Skip files and sections with nothing worth flagging.
- Line numbers refer to the new version of the file.

## Output (JSON)
- `review`: a list of findings, each with `file`, `line`, `category` (e.g. 'Security', 'Bug', 'Optimization', 'Improvement'), `comment` (the problem and a suggested fix) and `codeSnippet` (the code in question). Return an empty list when nothing needs attention.

## Diff
{diff}",
    context = context_section(context)
  )
}

/// Renders commits as markdown blocks separated by `---`.
pub fn format_commits_for_prompt(commits: &[GitCommit]) -> String {
  commits
    .iter()
    .map(|commit| {
      let body = if commit.body.is_empty() { String::new() } else { format!("\n\n{}", commit.body) };
      format!(
        "**Commit {}** ({})\nAuthor: {}\nSubject: {}{body}\n\n---",
        commit.short_hash, commit.date, commit.author, commit.subject
      )
    })
    .collect::<Vec<_>>()
    .join("\n\n")
}

pub fn changelog_prompt(commits: &[GitCommit], context: Option<&str>) -> String {
  format!(
    "You are a technical writer producing a changelog for an unreleased batch of commits. Readers never saw the intermediate states, so describe the end result rather than the history.
{context}
## Structure
- Group entries by the area of the product they affect, not by commit type. Use top-level `#` headers for areas (e.g. `# CLI Commands`).
- Inside an area, introduce each feature with a `>` blockquote line, then a short paragraph on the value it brings and bullets for specifics.
- Add a `How to Test:` list under a feature when it can be exercised by a user.
- Always end with a `# Under the Hood` section for internal work such as refactors, dependencies and infrastructure.

## Style
- Write for users. Do not mention functions, types, modules or other code identifiers.
- Merge commits that touch the same feature into one entry and drop changes that were later superseded.
- No emojis or decorative symbols in headers.

## Commits
{commits}

## Output (JSON)
- `changelog`: the changelog as markdown.",
    context = context_section(context),
    commits = format_commits_for_prompt(commits)
  )
}
