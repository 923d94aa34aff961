//! Prompt construction for the roast generator.

use github::WorkflowRun;

use crate::generator::RoastOptions;

const SYSTEM_PROMPT: &str = "\
You write short, biting roasts for developers whose CI just failed. \
Mock the failure, the commit, and the author's confidence with heavy \
sarcasm and pop-culture references, but keep it within the bounds of \
workplace banter. Roasts are written in GitHub-flavored markdown.";

const UNCENSORED_SYSTEM_PROMPT: &str = "\
You write merciless, over-the-top roasts for developers whose CI just \
failed. Be theatrical and relentless: drag the commit message, the branch \
name, and the author's life choices through the mud, pile on the sarcasm, \
and show no sympathy whatsoever. Stay profanity-light but spare nothing \
else. Roasts are written in GitHub-flavored markdown.";

/// Select the persona for the configured mode.
pub(crate) fn system_prompt(uncensored: bool) -> &'static str {
    if uncensored {
        UNCENSORED_SYSTEM_PROMPT
    } else {
        SYSTEM_PROMPT
    }
}

/// Build the run-context blob handed to the model.
pub(crate) fn user_prompt(run: &WorkflowRun, repo: &str, options: &RoastOptions) -> String {
    let mut prompt = format!(
        "Generate a roast for a failed workflow run. Use the following context:\n\
         - **Workflow Title**: {title}\n\
         - **Repository**: {repo}\n\
         - **Conclusion**: {conclusion}\n\
         - **Workflow URL**: {url}\n\
         - **Commit Message**: \"{commit_message}\"\n\
         - **Committer**: {committer}\n\
         - **Commit Date**: {commit_date}\n\
         - **Triggered by**: {actor}\n\
         - **Branch**: {branch}\n",
        title = run.display_title,
        repo = repo,
        conclusion = run.conclusion.as_deref().unwrap_or("unknown"),
        url = run.html_url,
        commit_message = run.head_commit.message,
        committer = run.head_commit.author.name,
        commit_date = run.head_commit.timestamp.to_rfc3339(),
        actor = run.actor.login,
        branch = run.head_branch,
    );

    if run.pull_requests.is_empty() {
        prompt.push_str("- This workflow was manually triggered and has no associated PR.\n");
    }

    prompt.push_str(&format!(
        "Address {actor} by name and include the workflow URL in your message.\n\
         Guidelines: each roast should be no more than {length} characters, \
         and generate up to {count} roast(s). Write them in markdown, \
         following GitHub's markdown syntax.",
        actor = run.actor.login,
        length = options.maximum_roast_length,
        count = options.maximum_roasts,
    ));

    prompt
}
