use std::collections::HashMap;

use crate::error::ParsetsSceneGraphError;
use crate::marks::{group::SceneGroup, mark::SceneMark};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    pub marks: Vec<SceneMark>,
    pub width: f32,
    pub height: f32,
    pub origin: [f32; 2],
}

impl SceneGraph {
    pub fn groups(&self) -> Vec<&SceneGroup> {
        self.marks
            .iter()
            .filter_map(|m| {
                let SceneMark::Group(g) = m else {
                    return None;
                };
                Some(g)
            })
            .collect()
    }

    pub fn children(&self) -> &[SceneMark] {
        &self.marks
    }

    pub fn get_mark(&self, mark_path: &[usize]) -> Option<&SceneMark> {
        // empty path is the root, which is not a mark
        let (first, rest) = mark_path.split_first()?;

        // Walk the path to find the nested mark
        let mut child = self.marks.get(*first)?;
        for index in rest {
            child = child.children().get(*index)?;
        }

        Some(child)
    }

    /// Returns the absolute origin of a group
    pub fn get_absolute_origin(&self, group_path: &[usize]) -> Option<[f32; 2]> {
        let mut origin = self.origin;
        let mut children = self.marks.as_slice();
        for index in group_path {
            let SceneMark::Group(group) = children.get(*index)? else {
                return None;
            };
            origin = [origin[0] + group.origin[0], origin[1] + group.origin[1]];
            children = &group.marks;
        }
        Some(origin)
    }

    /// Returns all of the group paths in the scene graph
    pub fn group_paths(&self) -> Vec<Vec<usize>> {
        let mut paths = vec![];
        for (index, mark) in self.marks.iter().enumerate() {
            let SceneMark::Group(group) = mark else {
                continue;
            };
            paths.push(vec![index]);
            for sub_path in group.group_paths() {
                let mut path = vec![index];
                path.extend(sub_path);
                paths.push(path);
            }
        }
        paths
    }

    /// Returns the absolute origin of each group
    pub fn group_origins(&self) -> Result<HashMap<Vec<usize>, [f32; 2]>, ParsetsSceneGraphError> {
        let mut origins = HashMap::new();
        for path in self.group_paths() {
            let origin = self
                .get_absolute_origin(&path)
                .ok_or_else(|| ParsetsSceneGraphError::InvalidMarkPath(path.clone()))?;
            origins.insert(path, origin);
        }
        Ok(origins)
    }

    /// Returns mapping from the names of each named group to their path
    pub fn group_names(&self) -> HashMap<String, Vec<usize>> {
        let mut names = HashMap::new();
        for path in self.group_paths() {
            let Some(SceneMark::Group(group)) = self.get_mark(&path) else {
                continue;
            };
            names.insert(group.name.clone(), path);
        }
        names
    }

    /// Looks up a group by name anywhere in the tree
    pub fn find_group(&self, name: &str) -> Option<&SceneGroup> {
        let path = self.group_names().remove(name)?;
        match self.get_mark(&path)? {
            SceneMark::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Total number of drawable instances
    pub fn instance_count(&self) -> usize {
        self.marks.iter().map(|m| m.instance_count()).sum()
    }

    pub fn validate(&self) -> Result<(), ParsetsSceneGraphError> {
        self.marks.iter().try_for_each(|m| m.validate())
    }
}
