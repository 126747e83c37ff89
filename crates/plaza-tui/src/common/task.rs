#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Identity,
    Auth,
    Logout,
    Feed,
    CreatePost,
    PostAction,
    Users,
    Follow,
    Profile,
    ProfileUpdate,
    AvatarUpload,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
///
/// Only the most recently started task of a kind is active; completions
/// carrying any other id are stale and get dropped.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn begin(&mut self, id: TaskId) {
        self.active = Some(id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub identity: TaskState,
    pub auth: TaskState,
    pub logout: TaskState,
    pub feed: TaskState,
    pub create_post: TaskState,
    pub post_action: TaskState,
    pub users: TaskState,
    pub follow: TaskState,
    pub profile: TaskState,
    pub profile_update: TaskState,
    pub avatar_upload: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Identity => &self.identity,
            TaskKind::Auth => &self.auth,
            TaskKind::Logout => &self.logout,
            TaskKind::Feed => &self.feed,
            TaskKind::CreatePost => &self.create_post,
            TaskKind::PostAction => &self.post_action,
            TaskKind::Users => &self.users,
            TaskKind::Follow => &self.follow,
            TaskKind::Profile => &self.profile,
            TaskKind::ProfileUpdate => &self.profile_update,
            TaskKind::AvatarUpload => &self.avatar_upload,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Identity => &mut self.identity,
            TaskKind::Auth => &mut self.auth,
            TaskKind::Logout => &mut self.logout,
            TaskKind::Feed => &mut self.feed,
            TaskKind::CreatePost => &mut self.create_post,
            TaskKind::PostAction => &mut self.post_action,
            TaskKind::Users => &mut self.users,
            TaskKind::Follow => &mut self.follow,
            TaskKind::Profile => &mut self.profile,
            TaskKind::ProfileUpdate => &mut self.profile_update,
            TaskKind::AvatarUpload => &mut self.avatar_upload,
        }
    }

    pub fn is_running(&self, kind: TaskKind) -> bool {
        self.state(kind).is_running()
    }

    /// Allocates an id and marks it as the active task of `kind`.
    ///
    /// A task of the same kind still in flight is superseded.
    pub fn start(&mut self, seq: &mut TaskSeq, kind: TaskKind) -> TaskId {
        let id = seq.next_id();
        self.state_mut(kind).begin(id);
        id
    }

    pub fn is_any_running(&self) -> bool {
        self.identity.is_running()
            || self.auth.is_running()
            || self.logout.is_running()
            || self.feed.is_running()
            || self.create_post.is_running()
            || self.post_action.is_running()
            || self.users.is_running()
            || self.follow.is_running()
            || self.profile.is_running()
            || self.profile_update.is_running()
            || self.avatar_upload.is_running()
    }

    /// Forgets every in-flight task so late completions are ignored.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_task_supersedes_older() {
        let mut seq = TaskSeq::default();
        let mut tasks = Tasks::default();

        let first = tasks.start(&mut seq, TaskKind::Feed);
        let second = tasks.start(&mut seq, TaskKind::Feed);

        assert!(!tasks.feed.finish_if_active(first));
        assert!(tasks.is_running(TaskKind::Feed));
        assert!(tasks.feed.finish_if_active(second));
        assert!(!tasks.is_any_running());
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut seq = TaskSeq::default();
        let mut tasks = Tasks::default();

        let feed = tasks.start(&mut seq, TaskKind::Feed);
        let users = tasks.start(&mut seq, TaskKind::Users);

        assert!(!tasks.feed.finish_if_active(users));
        assert!(tasks.users.finish_if_active(users));
        assert!(tasks.feed.finish_if_active(feed));
    }

    #[test]
    fn test_clear_all_drops_late_completions() {
        let mut seq = TaskSeq::default();
        let mut tasks = Tasks::default();

        let id = tasks.start(&mut seq, TaskKind::Profile);
        tasks.clear_all();
        assert!(!tasks.profile.finish_if_active(id));
    }
}
