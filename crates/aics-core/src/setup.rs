//! The calling setup checklist shown in the steps panel.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupTask {
    pub id: String,
    pub label: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupStep {
    pub id: String,
    pub number: u8,
    pub title: String,
    pub description: String,
    pub required: bool,
    pub tasks: Vec<SetupTask>,
}

impl SetupStep {
    /// Derived: a step is complete when every task is
    pub fn is_completed(&self) -> bool {
        self.tasks.iter().all(|t| t.completed)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

/// Input substrings that silently complete a task when typed.
///
/// Runs independently of the response matcher.
const TASK_KEYWORDS: &[(&[&str], &str)] = &[
    (&["pstn"], "setup-pstn"),
    (&["phone number", "add number"], "add-phone-numbers"),
    (&["emergency"], "emergency-services"),
    (&["schedule"], "setup-schedules"),
    (&["voice portal"], "setup-voice-portals"),
    (&["user"], "add-users"),
    (&["workspace"], "add-workspaces"),
    (&["device"], "add-devices"),
    (&["auto attendant"], "configure-auto-attendant"),
    (&["queue"], "configure-call-queue"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupChecklist {
    steps: Vec<SetupStep>,
}

impl Default for SetupChecklist {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SetupChecklist {
    pub fn new(steps: Vec<SetupStep>) -> Self {
        Self { steps }
    }

    /// The four-step calling setup workflow, nothing completed
    pub fn builtin() -> Self {
        Self::new(vec![
            step(
                "step1",
                1,
                "Define service foundation",
                "This step is required and recommended to set up before adding users.",
                true,
                &[
                    ("add-locations", "Add location(s)", "Define physical locations where your calling services will be deployed"),
                    ("setup-pstn", "Set up PSTN connection", "Configure your Public Switched Telephone Network connection for external calling"),
                    ("add-phone-numbers", "Add phone numbers and define your internal dialing", "Import or order phone numbers and set up dial plans"),
                ],
            ),
            step(
                "step2",
                2,
                "Configure locations",
                "Set up location-specific calling settings and emergency services.",
                false,
                &[
                    ("assign-main-number", "Assign a main number to your location", "Set the primary outbound caller ID for each location"),
                    ("emergency-services", "Configure your emergency services calling", "Set up E911 or emergency calling addresses for each location"),
                    ("setup-schedules", "Set up the schedules", "Define business hours and holiday schedules"),
                    ("setup-voice-portals", "Set up the voice portals", "Configure voicemail and other voice portal settings"),
                ],
            ),
            step(
                "step3",
                3,
                "Configure users, workspaces, and devices for calling",
                "Add and configure users, workspaces, and devices with calling capabilities.",
                false,
                &[
                    ("add-users", "Add users and assign calling licenses", "Provision users with Webex Calling licenses"),
                    ("configure-user-settings", "Configure user settings", "Set up user-specific calling features and phone numbers"),
                    ("add-workspaces", "Add workspaces and assign calling licenses", "Configure shared spaces like conference rooms"),
                    ("configure-workspace-settings", "Configure workspace settings", "Set up calling features for shared workspaces"),
                    ("add-devices", "Add personal, shared usage, and hot desk only devices", "Register and configure desk phones and other devices"),
                ],
            ),
            step(
                "step4",
                4,
                "Configure common calling features",
                "Set up advanced calling features like auto attendants and call queues.",
                false,
                &[
                    ("configure-auto-attendant", "Configure an auto attendant", "Create IVR menus to route incoming calls"),
                    ("configure-call-queue", "Configure a call queue", "Set up call distribution to groups of agents"),
                ],
            ),
        ])
    }

    pub fn steps(&self) -> &[SetupStep] {
        &self.steps
    }

    pub fn step(&self, step_id: &str) -> Option<&SetupStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    pub fn step_by_number(&self, number: u8) -> Option<&SetupStep> {
        self.steps.iter().find(|s| s.number == number)
    }

    pub fn task(&self, task_id: &str) -> Option<&SetupTask> {
        self.steps
            .iter()
            .flat_map(|s| s.tasks.iter())
            .find(|t| t.id == task_id)
    }

    fn task_mut(&mut self, task_id: &str) -> Option<&mut SetupTask> {
        self.steps
            .iter_mut()
            .flat_map(|s| s.tasks.iter_mut())
            .find(|t| t.id == task_id)
    }

    /// Mark a task complete. Returns false for unknown ids.
    pub fn complete_task(&mut self, task_id: &str) -> bool {
        match self.task_mut(task_id) {
            Some(task) => {
                task.completed = true;
                true
            }
            None => false,
        }
    }

    /// Flip one task inside one step. Unknown ids leave the checklist untouched.
    pub fn toggle_task(&mut self, step_id: &str, task_id: &str) -> bool {
        let task = self
            .steps
            .iter_mut()
            .find(|s| s.id == step_id)
            .and_then(|s| s.tasks.iter_mut().find(|t| t.id == task_id));

        match task {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Complete every task whose keywords occur in `input`.
    /// Returns the ids that were newly completed.
    pub fn apply_keywords(&mut self, input: &str) -> Vec<&'static str> {
        let lower = input.to_lowercase();
        let mut newly_completed = Vec::new();

        for (keywords, task_id) in TASK_KEYWORDS {
            if !keywords.iter().any(|k| lower.contains(k)) {
                continue;
            }
            if let Some(task) = self.task_mut(task_id) {
                if !task.completed {
                    task.completed = true;
                    newly_completed.push(*task_id);
                }
            }
        }

        newly_completed
    }

    pub fn total_tasks(&self) -> usize {
        self.steps.iter().map(|s| s.tasks.len()).sum()
    }

    pub fn total_completed(&self) -> usize {
        self.steps.iter().map(|s| s.completed_count()).sum()
    }
}

fn step(
    id: &str,
    number: u8,
    title: &str,
    description: &str,
    required: bool,
    tasks: &[(&str, &str, &str)],
) -> SetupStep {
    SetupStep {
        id: id.to_string(),
        number,
        title: title.to_string(),
        description: description.to_string(),
        required,
        tasks: tasks
            .iter()
            .map(|(id, label, description)| SetupTask {
                id: id.to_string(),
                label: label.to_string(),
                description: description.to_string(),
                completed: false,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_steps(checklist: &SetupChecklist) -> Vec<&str> {
        checklist
            .steps()
            .iter()
            .filter(|s| s.is_completed())
            .map(|s| s.id.as_str())
            .collect()
    }

    #[test]
    fn test_builtin_shape() {
        let checklist = SetupChecklist::builtin();
        assert_eq!(checklist.steps().len(), 4);
        assert_eq!(checklist.total_tasks(), 14);
        assert_eq!(checklist.total_completed(), 0);
        assert!(checklist.step_by_number(1).unwrap().required);
        assert!(!checklist.step("step4").unwrap().required);
    }

    #[test]
    fn test_step_one_completes_alone() {
        let mut checklist = SetupChecklist::builtin();
        for id in ["add-locations", "setup-pstn", "add-phone-numbers"] {
            assert!(checklist.complete_task(id));
        }
        assert_eq!(completed_steps(&checklist), vec!["step1"]);
        for id in ["step2", "step3", "step4"] {
            assert_eq!(checklist.step(id).unwrap().completed_count(), 0);
        }
    }

    #[test]
    fn test_toggle_flips_and_ignores_unknown() {
        let mut checklist = SetupChecklist::builtin();
        assert!(checklist.toggle_task("step2", "setup-schedules"));
        assert!(checklist.task("setup-schedules").unwrap().completed);
        assert!(checklist.toggle_task("step2", "setup-schedules"));
        assert!(!checklist.task("setup-schedules").unwrap().completed);

        // task exists but belongs to another step
        assert!(!checklist.toggle_task("step1", "setup-schedules"));
        assert!(!checklist.toggle_task("step9", "nope"));
        assert_eq!(checklist, SetupChecklist::builtin());
    }

    #[test]
    fn test_keywords_complete_unrelated_tasks() {
        let mut checklist = SetupChecklist::builtin();
        let done = checklist.apply_keywords("Which PSTN works for remote USERS with a call queue?");
        assert_eq!(done, vec!["setup-pstn", "add-users", "configure-call-queue"]);
    }

    #[test]
    fn test_keywords_never_uncomplete() {
        let mut checklist = SetupChecklist::builtin();
        checklist.apply_keywords("emergency");
        assert!(checklist.apply_keywords("emergency again").is_empty());
        assert!(checklist.task("emergency-services").unwrap().completed);
    }

    #[test]
    fn test_phone_number_keywords() {
        let mut checklist = SetupChecklist::builtin();
        assert_eq!(checklist.apply_keywords("add numbers please"), vec!["add-phone-numbers"]);
    }
}
