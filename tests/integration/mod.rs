/// End-to-end command workflows
mod workflow;
mod coach_workflow;
