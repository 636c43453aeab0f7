use {
    serde::{Serialize, Deserialize},
    net_ensembles::Node,
    crate::error::SirError,
};

#[derive(Clone, Debug, PartialEq, Eq, Copy)]
#[derive(Serialize, Deserialize)]
pub enum InfectionState{
    Susceptible,
    Infected,
    Recovered,
}

impl InfectionState{
    pub fn sus_check(&self) -> bool{
        matches!(self, InfectionState::Susceptible)
    }
    pub fn inf_check(&self) -> bool{
        matches!(self, InfectionState::Infected)
    }
    pub fn rec_check(&self) -> bool{
        matches!(self, InfectionState::Recovered)
    }

    pub fn is_or_was_infected(&self) -> bool
    {
        matches!(self, Self::Infected | Self::Recovered)
    }

    /// S -> I, the only way into the infected compartment
    pub fn infect(&mut self, node: usize) -> Result<(), SirError>
    {
        match self {
            Self::Susceptible => {
                *self = Self::Infected;
                Ok(())
            },
            found => Err(
                SirError::ContractViolation{
                    node,
                    found: *found,
                    expected: Self::Susceptible
                }
            )
        }
    }

    /// I -> R. Recovered is terminal
    pub fn recover(&mut self, node: usize) -> Result<(), SirError>
    {
        match self {
            Self::Infected => {
                *self = Self::Recovered;
                Ok(())
            },
            found => Err(
                SirError::ContractViolation{
                    node,
                    found: *found,
                    expected: Self::Infected
                }
            )
        }
    }
}

impl Default for InfectionState{
    fn default() -> Self{
        InfectionState::Susceptible
    }
}

// lets the state double as node payload of the net_ensembles graphs
impl Node for InfectionState{
    fn new_from_index(_index: usize) -> Self{
        InfectionState::Susceptible
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn transitions_only_go_forward()
    {
        let mut state = InfectionState::default();
        assert!(state.sus_check());
        assert!(state.recover(3).is_err());

        state.infect(3).unwrap();
        assert!(state.inf_check());
        assert!(state.is_or_was_infected());

        let err = state.infect(3).unwrap_err();
        assert_eq!(
            err,
            SirError::ContractViolation{
                node: 3,
                found: InfectionState::Infected,
                expected: InfectionState::Susceptible
            }
        );

        state.recover(3).unwrap();
        assert!(state.rec_check());
        assert!(state.infect(3).is_err());
        assert!(state.recover(3).is_err());
    }
}
