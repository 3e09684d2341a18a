use std::collections::HashMap;

use crate::error::ChartwellSceneGraphError;
use crate::marks::{group::SceneGroup, mark::SceneMark};
use serde::{Deserialize, Serialize};

/// Everything a chart draws for one render, in drawing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    pub marks: Vec<SceneMark>,
    pub width: f32,
    pub height: f32,
    pub origin: [f32; 2],
}

impl SceneGraph {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            marks: vec![],
            width,
            height,
            origin: [0.0, 0.0],
        }
    }

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
        let mut child = self.marks.get(*first)?;
        for index in rest {
            child = child.children().get(*index)?;
        }
        Some(child)
    }

    /// Returns the absolute origin of a group
    pub fn get_absolute_origin(
        &self,
        group_path: &[usize],
    ) -> Result<[f32; 2], ChartwellSceneGraphError> {
        let mut origin = self.origin;
        let mut marks = &self.marks;
        for index in group_path {
            let Some(SceneMark::Group(group)) = marks.get(*index) else {
                return Err(ChartwellSceneGraphError::InvalidMarkPath(
                    group_path.to_vec(),
                ));
            };
            origin = [origin[0] + group.origin[0], origin[1] + group.origin[1]];
            marks = &group.marks;
        }
        Ok(origin)
    }

    /// Returns all of the group paths in the scene graph
    pub fn group_paths(&self) -> Vec<Vec<usize>> {
        let mut paths = vec![];
        for (index, mark) in self.marks.iter().enumerate() {
            let SceneMark::Group(group) = mark else {
                continue;
            };
            paths.push(vec![index]);
            for sub_path in group_paths(group) {
                let mut path = vec![index];
                path.extend(sub_path);
                paths.push(path);
            }
        }
        paths
    }

    /// Returns mapping from the names of each group to their path
    pub fn group_names(&self) -> HashMap<String, Vec<usize>> {
        let mut names = HashMap::new();
        for path in self.group_paths() {
            if let Some(SceneMark::Group(group)) = self.get_mark(&path) {
                names.insert(group.name.clone(), path);
            }
        }
        names
    }

    /// Group with the given name, searching depth first
    pub fn find_group(&self, name: &str) -> Option<&SceneGroup> {
        let path = self.group_names().remove(name)?;
        match self.get_mark(&path)? {
            SceneMark::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Every non-group mark paired with the absolute origin it is drawn at
    pub fn leaf_marks(&self) -> Vec<([f32; 2], &SceneMark)> {
        let mut leaves = vec![];
        collect_leaves(&self.marks, self.origin, &mut leaves);
        leaves
    }

    /// Total number of drawable instances across all marks
    pub fn mark_count(&self) -> usize {
        self.marks.iter().map(|m| m.instance_count()).sum()
    }

    pub fn validate(&self) -> Result<(), ChartwellSceneGraphError> {
        self.marks.iter().try_for_each(|m| m.validate())
    }
}

fn group_paths(group: &SceneGroup) -> Vec<Vec<usize>> {
    let mut paths = vec![];
    for (index, mark) in group.marks.iter().enumerate() {
        if let SceneMark::Group(child) = mark {
            paths.push(vec![index]);
            for sub_path in group_paths(child) {
                let mut path = vec![index];
                path.extend(sub_path);
                paths.push(path);
            }
        }
    }
    paths
}

fn collect_leaves<'a>(
    marks: &'a [SceneMark],
    origin: [f32; 2],
    leaves: &mut Vec<([f32; 2], &'a SceneMark)>,
) {
    for mark in marks {
        match mark {
            SceneMark::Group(group) => {
                let child_origin = [origin[0] + group.origin[0], origin[1] + group.origin[1]];
                collect_leaves(&group.marks, child_origin, leaves);
            }
            _ => leaves.push((origin, mark)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marks::rect::SceneRectMark;
    use crate::marks::rule::SceneRuleMark;

    fn nested_scene() -> SceneGraph {
        let mut inner = SceneGroup::new("plot").with_origin([10.0, 20.0]);
        inner.push(SceneRectMark {
            len: 3,
            x: vec![0.0, 1.0, 2.0].into(),
            ..Default::default()
        });
        let mut outer = SceneGroup::new("chart").with_origin([5.0, 5.0]);
        outer.push(SceneRuleMark::default());
        outer.push(inner);
        let mut scene = SceneGraph::new(100.0, 100.0);
        scene.marks.push(outer.into());
        scene
    }

    #[test]
    fn test_group_paths_and_origins() {
        let scene = nested_scene();
        assert_eq!(scene.group_paths(), vec![vec![0], vec![0, 1]]);
        assert_eq!(scene.get_absolute_origin(&[0, 1]).unwrap(), [15.0, 25.0]);
        assert!(scene.get_absolute_origin(&[0, 0]).is_err());
        assert_eq!(scene.find_group("plot").map(|g| g.marks.len()), Some(1));
    }

    #[test]
    fn test_leaf_marks_and_count() {
        let scene = nested_scene();
        let leaves = scene.leaf_marks();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[1].0, [15.0, 25.0]);
        assert_eq!(scene.mark_count(), 4);
        assert!(scene.get_mark(&[]).is_none());
    }
}
