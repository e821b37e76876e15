//! Rendering of a finished decomposition as text or JSON.

use overlaps::{Coord, OverlapError, PartitionTree};
use serde::{Deserialize, Serialize};

/// An input rectangle as echoed in the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub id: usize,
    pub x: Coord,
    pub y: Coord,
    pub w: Coord,
    pub h: Coord,
}

/// One intersection group and its common region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub ids: Vec<usize>,
    pub x: Coord,
    pub y: Coord,
    pub w: Coord,
    pub h: Coord,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub input: Vec<InputRecord>,
    pub intersections: Vec<GroupRecord>,
}

impl Report {
    /// Snapshot of `tree`, groups in the tree's order.
    pub fn from_tree(tree: &PartitionTree) -> Result<Self, OverlapError> {
        let input = tree
            .rectangles()
            .iter()
            .map(|r| InputRecord {
                id: r.id().0,
                x: r.origin().x,
                y: r.origin().y,
                w: r.width(),
                h: r.height(),
            })
            .collect();
        let intersections = tree
            .intersections()
            .iter()
            .map(|g| {
                let region = g.calculate()?;
                Ok(GroupRecord {
                    ids: g.ids().map(|id| id.0).collect(),
                    x: region.origin().x,
                    y: region.origin().y,
                    w: region.width(),
                    h: region.height(),
                })
            })
            .collect::<Result<Vec<_>, OverlapError>>()?;
        Ok(Self { input, intersections })
    }

    /// Plain text listing of the input followed by the intersections.
    pub fn to_text(&self) -> String {
        let mut out = String::from("Input:\n");
        for r in &self.input {
            out.push_str(&format!("\t{}: Rectangle at ({},{}), w={}, h={}.\n", r.id, r.x, r.y, r.w, r.h));
        }
        out.push_str("\nIntersections\n");
        for g in &self.intersections {
            out.push_str(&format!(
                "\tBetween rectangle {} at ({},{}), w={}, h={}.\n",
                join_ids(&g.ids),
                g.x,
                g.y,
                g.w,
                g.h
            ));
        }
        out
    }
}

/// `1`, `1 and 2`, `1, 3 and 4`.
fn join_ids(ids: &[usize]) -> String {
    match ids.split_last() {
        None => String::new(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => {
            let head: Vec<String> = rest.iter().map(usize::to_string).collect();
            format!("{} and {last}", head.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlaps::Rectangle;

    fn cluster_tree() -> PartitionTree {
        let rects = vec![
            Rectangle::from_xywh(100, 100, 250, 80, 1).unwrap(),
            Rectangle::from_xywh(120, 200, 250, 150, 2).unwrap(),
            Rectangle::from_xywh(140, 160, 250, 100, 3).unwrap(),
            Rectangle::from_xywh(160, 140, 350, 190, 4).unwrap(),
        ];
        PartitionTree::new(rects, None).unwrap()
    }

    #[test]
    fn joins_ids_like_prose() {
        assert_eq!(join_ids(&[1]), "1");
        assert_eq!(join_ids(&[1, 2]), "1 and 2");
        assert_eq!(join_ids(&[1, 3, 4]), "1, 3 and 4");
        assert_eq!(join_ids(&[]), "");
    }

    #[test]
    fn text_report_for_cluster() {
        let text = Report::from_tree(&cluster_tree()).unwrap().to_text();
        let expected = "Input:\n\
            \t1: Rectangle at (100,100), w=250, h=80.\n\
            \t2: Rectangle at (120,200), w=250, h=150.\n\
            \t3: Rectangle at (140,160), w=250, h=100.\n\
            \t4: Rectangle at (160,140), w=350, h=190.\n\
            \n\
            Intersections\n\
            \tBetween rectangle 1 and 3 at (140,160), w=210, h=20.\n\
            \tBetween rectangle 1 and 4 at (160,140), w=190, h=40.\n\
            \tBetween rectangle 2 and 3 at (140,200), w=230, h=60.\n\
            \tBetween rectangle 2 and 4 at (160,200), w=210, h=130.\n\
            \tBetween rectangle 3 and 4 at (160,160), w=230, h=100.\n\
            \tBetween rectangle 1, 3 and 4 at (160,160), w=190, h=20.\n\
            \tBetween rectangle 2, 3 and 4 at (160,200), w=210, h=60.\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn input_lines_match_rectangle_display() {
        let tree = cluster_tree();
        let text = Report::from_tree(&tree).unwrap().to_text();
        for r in tree.rectangles() {
            assert!(text.contains(&format!("\t{r}\n")));
        }
    }

    #[test]
    fn json_report_shape() {
        let report = Report::from_tree(&cluster_tree()).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["input"].as_array().unwrap().len(), 4);
        assert_eq!(value["intersections"][5]["ids"], serde_json::json!([1, 3, 4]));
        assert_eq!(value["intersections"][5]["w"], 190);
        let back: Report = serde_json::from_value(value).unwrap();
        assert_eq!(back, report);
    }
}
