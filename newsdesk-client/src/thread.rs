use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet, VecDeque},
};

use crate::{
    api::{Comment, CommentId, Time, UserDirectory, UserId, UserProfile},
    RelativeTime,
};

/// Children of each comment, keyed by parent id (`None` for top-level comments)
#[derive(Clone, Debug, Default)]
pub struct ChildIndex(HashMap<Option<CommentId>, Vec<CommentId>>);

impl ChildIndex {
    pub fn build<'a>(comments: impl IntoIterator<Item = &'a Comment>) -> ChildIndex {
        let mut res = HashMap::<_, Vec<_>>::new();
        for c in comments {
            res.entry(c.parent_id.clone())
                .or_default()
                .push(c.id.clone());
        }
        ChildIndex(res)
    }

    pub fn children(&self, parent: Option<&CommentId>) -> &[CommentId] {
        self.0
            .get(&parent.cloned())
            .map(|v| v as &[_])
            .unwrap_or(&[])
    }

    /// `id` and everything transitively replying to it, found breadth-first
    pub fn descendants(&self, id: &CommentId) -> HashSet<CommentId> {
        let mut res = HashSet::new();
        res.insert(id.clone());
        let mut queue = VecDeque::new();
        queue.push_back(id.clone());
        while let Some(parent) = queue.pop_front() {
            for child in self.children(Some(&parent)) {
                if res.insert(child.clone()) {
                    queue.push_back(child.clone());
                }
            }
        }
        res
    }
}

/// Tree view over the flat comment list of one article
#[derive(Clone, Debug, Default)]
pub struct Thread {
    comments: HashMap<CommentId, Comment>,

    /// Newest first
    roots: Vec<CommentId>,

    /// Oldest first
    replies: HashMap<CommentId, Vec<CommentId>>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentView {
    pub comment: Comment,
    pub author: UserProfile,
    pub like_count: usize,
    pub liked_by_viewer: bool,
    pub editable_by_viewer: bool,
    pub posted: RelativeTime,

    /// 0 for a root, one more for each reply level
    pub depth: usize,
}

impl Thread {
    /// A reply whose parent is not in `comments` is shown as a root. The news
    /// portal's own thread view hides such replies instead.
    pub fn build(comments: Vec<Comment>) -> Thread {
        let index = ChildIndex::build(comments.iter());
        let comments = comments
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect::<HashMap<_, _>>();

        let mut roots = Vec::new();
        let mut replies = HashMap::new();
        for c in comments.values() {
            match &c.parent_id {
                None => roots.push(c.id.clone()),
                Some(p) if !comments.contains_key(p) => {
                    tracing::warn!(
                        comment = %c.id,
                        parent = %p,
                        "reply to missing comment, showing it top-level"
                    );
                    roots.push(c.id.clone());
                }
                Some(_) => (),
            }
            let mut children = index.children(Some(&c.id)).to_vec();
            if !children.is_empty() {
                children.sort_unstable_by_key(|id| (comments[id].timestamp, id.clone()));
                replies.insert(c.id.clone(), children);
            }
        }
        roots.sort_unstable_by_key(|id| (Reverse(comments[id].timestamp), id.clone()));

        Thread {
            comments,
            roots,
            replies,
        }
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn get(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.get(id)
    }

    pub fn roots(&self) -> impl Iterator<Item = &Comment> {
        self.roots.iter().map(|id| &self.comments[id])
    }

    pub fn replies(&self, id: &CommentId) -> impl Iterator<Item = &Comment> {
        self.replies
            .get(id)
            .into_iter()
            .flat_map(|v| v.iter())
            .map(|id| &self.comments[id])
    }

    /// 0 for a root, None if `id` is not in this thread
    pub fn depth(&self, id: &CommentId) -> Option<usize> {
        let mut current = self.comments.get(id)?;
        let mut depth = 0;
        while let Some(parent) = current.parent_id.as_ref().and_then(|p| self.comments.get(p)) {
            depth += 1;
            if depth > self.comments.len() {
                tracing::error!(comment = %id, "cycle in comment parents");
                return None;
            }
            current = parent;
        }
        Some(depth)
    }

    pub fn author_ids(&self) -> HashSet<UserId> {
        self.comments
            .values()
            .map(|c| c.author_id.clone())
            .collect()
    }

    pub fn resolve_authors<D: UserDirectory>(&self, directory: &D) -> HashMap<UserId, UserProfile> {
        directory
            .resolve_users(&self.author_ids())
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect()
    }

    /// Views of the whole thread in display order: each comment comes right
    /// before its replies, and `depth` gives its nesting level
    ///
    /// Comments whose author is unknown are left out, along with their replies.
    pub fn render(
        &self,
        viewer: Option<&UserId>,
        authors: &HashMap<UserId, UserProfile>,
        now: Time,
    ) -> Vec<CommentView> {
        let mut res = Vec::with_capacity(self.comments.len());
        let mut stack = self.roots.iter().rev().map(|id| (id, 0)).collect::<Vec<_>>();
        while let Some((id, depth)) = stack.pop() {
            let comment = &self.comments[id];
            let author = match authors.get(&comment.author_id) {
                Some(a) => a,
                None => continue,
            };
            res.push(CommentView {
                comment: comment.clone(),
                author: author.clone(),
                like_count: comment.like_user_ids.len(),
                liked_by_viewer: viewer.map_or(false, |v| comment.is_liked_by(v)),
                editable_by_viewer: viewer == Some(&comment.author_id),
                posted: RelativeTime::between(comment.timestamp, now),
                depth,
            });
            if let Some(replies) = self.replies.get(id) {
                stack.extend(replies.iter().rev().map(|r| (r, depth + 1)));
            }
        }
        res
    }
}
