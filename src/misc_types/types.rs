use{
    serde::{Serialize, Deserialize},
    std::num::*,
};

pub const DEFAULT_SYSTEM_SIZE: NonZeroUsize = unsafe{NonZeroUsize::new_unchecked(1000)};
pub const DEFAULT_TAU: f64 = 2.0;
pub const DEFAULT_GAMMA: f64 = 1.0;
pub const DEFAULT_GRAPH_SEED: u64 = 875629289;
pub const DEFAULT_SIR_SEED: u64 = 1489264107025;
pub const DEFAULT_INITIAL_INFECTED: usize = 1;
pub const DEFAULT_DT: f64 = 0.01;
pub const DEFAULT_REPETITIONS: usize = 100;
/// a run counts as premature extinction if the peak of I stays at or below
/// this multiple of the initially infected
pub const DEFAULT_EXTINCTION_FACTOR: f64 = 4.0;
/// mean degree of the Erdős–Rényi graphs the monte carlo runs default to
pub const DEFAULT_MEAN_DEGREE: f64 = 10.0;
/// give up finding a connected random graph after this many tries
pub const MAX_GRAPH_RANDOMIZATIONS: u32 = 10_000;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum GraphType{
    /// everyone is connected to everyone
    Complete,
    /// G(n, p) with p chosen for the given mean degree
    ErdosRenyi(f64),
    /// rewiring probability
    SmallWorld(f64),
    /// m, source_n
    Barabasi(usize,usize),
    /// explicit undirected edges
    EdgeList(Vec<[usize; 2]>),
}

impl GraphType{
    pub fn name(&self) -> String
    {
        match self
        {
            Self::Complete => "complete".to_owned(),
            Self::ErdosRenyi(c) => format!("er{}", c),
            Self::SmallWorld(p) => format!("sw{}", p),
            Self::Barabasi(q,r) => format!("ba{}{}",q,r),
            Self::EdgeList(e) => format!("edges{}", e.len()),
        }
    }

    /// Only random graphs depend on the graph seed
    pub fn is_random(&self) -> bool
    {
        matches!(self, Self::ErdosRenyi(_) | Self::SmallWorld(_) | Self::Barabasi(_, _))
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn graph_type_json()
    {
        let sw: GraphType = serde_json::from_str(r#"{"SmallWorld": 0.1}"#).unwrap();
        assert_eq!(sw, GraphType::SmallWorld(0.1));
        assert_eq!(sw.name(), "sw0.1");
        let complete: GraphType = serde_json::from_str(r#""Complete""#).unwrap();
        assert!(!complete.is_random());
        let edges: GraphType = serde_json::from_str(r#"{"EdgeList": [[0, 1], [1, 2]]}"#).unwrap();
        assert_eq!(edges.name(), "edges2");
        let er: GraphType = serde_json::from_str(r#"{"ErdosRenyi": 10.0}"#).unwrap();
        assert!(er.is_random());
        assert_eq!(er.name(), "er10");
    }
}
