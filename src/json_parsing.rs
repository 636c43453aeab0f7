use{
    serde::{Serialize, de::DeserializeOwned},
    serde_json::Value,
    std::{
        fs::File,
        io::BufReader,
        path::Path,
        process::exit,
    },
    crate::error::ConfigError,
};

/// # Read the parameters of a subcommand
/// * without a file the default parameters are printed as example json
///   and the program exits
/// * the raw json is returned too, it ends up in the header of the output files
pub fn parse<P, T>(file: Option<P>) -> Result<(T, Value), ConfigError>
where P: AsRef<Path>,
    T: Default + Serialize + DeserializeOwned
{
    match file
    {
        None => {
            let example = T::default();
            serde_json::to_writer_pretty(
                std::io::stdout(),
                &example
            )?;
            println!();
            exit(0)
        },
        Some(file) => parse_file(file)
    }
}

pub fn parse_file<P, T>(file: P) -> Result<(T, Value), ConfigError>
where P: AsRef<Path>,
    T: DeserializeOwned
{
    let path = file.as_ref();
    let f = File::open(path)
        .map_err(|e| ConfigError::io(path.display().to_string(), e))?;
    let json_val: Value = serde_json::from_reader(BufReader::new(f))?;
    let opt: T = serde_json::from_value(json_val.clone())?;
    Ok((opt, json_val))
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::monte_carlo::MonteCarloParam;

    #[test]
    fn parses_partial_file_with_defaults()
    {
        let path = std::env::temp_dir()
            .join(format!("gillespie_sir_parse_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"tau": 0.5, "repetitions": 3}"#).unwrap();
        let (param, json): (MonteCarloParam, Value) = parse_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(param.tau, 0.5);
        assert_eq!(param.repetitions, 3);
        assert_eq!(param.gamma, MonteCarloParam::default().gamma);
        assert_eq!(json["tau"], 0.5);
    }

    #[test]
    fn missing_file()
    {
        let res: Result<(MonteCarloParam, Value), _> = parse_file("/nonexistent/params.json");
        assert!(matches!(res, Err(ConfigError::Io{..})));
    }
}
