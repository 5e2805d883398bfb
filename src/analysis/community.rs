//! Community extraction by score threshold
//!
//! A personalized ranking concentrates mass around its seeds; thresholding
//! it carves out the seeds' community. Extraction works on positions; a
//! driver that wants raw identifiers maps them back through the graph.

use serde::{Deserialize, Serialize};

/// One node admitted into a community.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommunityMember {
    /// Dense position of the node.
    pub node: u32,
    /// The node's score in the ranking the community was cut from.
    pub score: f64,
}

/// Positions with `score >= threshold`, best first.
///
/// Ties are broken by ascending position, so output order is deterministic.
pub fn extract(scores: &[f64], threshold: f64) -> Vec<CommunityMember> {
    let mut members: Vec<CommunityMember> = scores
        .iter()
        .enumerate()
        .filter(|(_, &score)| score >= threshold)
        .map(|(pos, &score)| CommunityMember {
            node: pos as u32,
            score,
        })
        .collect();

    members.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.node.cmp(&b.node)));
    members
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let members = extract(&[0.5, 0.3, 0.2], 0.3);

        assert_eq!(members.len(), 2);
        assert_eq!(members[0].node, 0);
        assert_eq!(members[1].node, 1);
    }

    #[test]
    fn test_sorted_by_descending_score() {
        let members = extract(&[0.1, 0.4, 0.2, 0.3], 0.0);

        let scores: Vec<f64> = members.iter().map(|m| m.score).collect();
        assert_eq!(scores, vec![0.4, 0.3, 0.2, 0.1]);
        assert_eq!(members[0].node, 1);
    }

    #[test]
    fn test_ties_broken_by_position() {
        let members = extract(&[0.2, 0.5, 0.2], 0.1);

        assert_eq!(members[0].node, 1);
        assert_eq!(members[1].node, 0);
        assert_eq!(members[2].node, 2);
    }

    #[test]
    fn test_nothing_above_threshold() {
        let members = extract(&[0.01, 0.02], 0.5);
        assert!(members.is_empty());
    }

    #[test]
    fn test_empty_scores() {
        assert!(extract(&[], 0.0).is_empty());
    }

    #[test]
    fn test_zero_threshold_admits_everything() {
        let members = extract(&[0.0, 0.7, 0.3], 0.0);
        assert_eq!(members.len(), 3);
    }

    #[test]
    fn test_member_serializes_node_and_score() {
        let member = CommunityMember {
            node: 4,
            score: 0.25,
        };
        let json = serde_json::to_string(&member).unwrap();
        assert_eq!(json, "{\"node\":4,\"score\":0.25}");
    }
}
