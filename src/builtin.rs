use crate::command::{Builtin, Flow};
use crate::error::ShellError;
use std::env;
use std::ffi::OsStr;
use std::io::Write;
use std::path::PathBuf;

/// Ordered table of built-in commands.
///
/// Lookup is exact and case-sensitive. Iteration follows insertion order, which is
/// the order `help` lists the commands in.
pub struct Registry {
    builtins: Vec<Box<dyn Builtin>>,
}

impl Registry {
    /// Create a registry from a list of built-ins.
    pub fn new(builtins: Vec<Box<dyn Builtin>>) -> Self {
        Self { builtins }
    }

    /// Find the built-in called exactly `name`.
    pub fn get(&self, name: impl AsRef<OsStr>) -> Option<&dyn Builtin> {
        let name = name.as_ref();
        self.builtins
            .iter()
            .find(|b| b.name() == name)
            .map(|b| &**b)
    }

    /// Names of all registered built-ins, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.builtins.iter().map(|b| b.name())
    }
}

impl Default for Registry {
    /// The standard built-ins: `cd`, `help`, `exit`.
    fn default() -> Self {
        Self::new(vec![Box::new(Cd), Box::new(Help), Box::new(Exit)])
    }
}

/// Change the current working directory of the interpreter process.
///
/// Requires exactly one meaningful argument; further arguments are ignored. Without an
/// argument it reports a usage error and leaves the directory alone.
pub struct Cd;

impl Builtin for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn execute(
        &self,
        args: &[&OsStr],
        _registry: &Registry,
        _stdout: &mut dyn Write,
    ) -> Result<Flow, ShellError> {
        let target = args.get(1).ok_or(ShellError::MissingArgument {
            command: self.name(),
        })?;
        let path = PathBuf::from(target);
        env::set_current_dir(&path).map_err(|source| ShellError::ChangeDir { path, source })?;
        Ok(Flow::Continue)
    }
}

/// Print a short banner and the names of the built-in commands.
pub struct Help;

impl Builtin for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn execute(
        &self,
        _args: &[&OsStr],
        registry: &Registry,
        stdout: &mut dyn Write,
    ) -> Result<Flow, ShellError> {
        writeln!(stdout, "bsh: a minimal command interpreter")?;
        writeln!(stdout, "Type command names and arguments and hit enter.")?;
        writeln!(stdout, "The following are built in:")?;
        for name in registry.names() {
            writeln!(stdout, "  {name}")?;
        }
        writeln!(stdout, "Use the man command for information on other programs.")?;
        Ok(Flow::Continue)
    }
}

/// Halt the interpreter. Arguments are ignored.
pub struct Exit;

impl Builtin for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn execute(
        &self,
        _args: &[&OsStr],
        _registry: &Registry,
        _stdout: &mut dyn Write,
    ) -> Result<Flow, ShellError> {
        Ok(Flow::Stop)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::ffi::OsStrExt;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    /// Serializes tests that touch the process-wide working directory.
    pub(crate) fn lock_current_dir() -> MutexGuard<'static, ()> {
        static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
        MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn run(builtin: &dyn Builtin, args: &[&str]) -> (Result<Flow, ShellError>, String) {
        let args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();
        let mut out = Vec::new();
        let res = builtin.execute(&args, &Registry::default(), &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_registry_order_and_lookup() {
        let registry = Registry::default();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["cd", "help", "exit"]);
        assert_eq!(registry.get("help").map(|b| b.name()), Some("help"));
    }

    #[test]
    fn test_registry_lookup_is_exact() {
        let registry = Registry::default();
        assert!(registry.get("EXIT").is_none());
        assert!(registry.get("ex").is_none());
        assert!(registry.get("exit ").is_none());
        assert!(registry.get("").is_none());
    }

    #[test]
    fn test_exit_stops_and_ignores_arguments() {
        let (res, out) = run(&Exit, &["exit"]);
        assert_eq!(res.unwrap(), Flow::Stop);
        assert!(out.is_empty());

        let (res, _) = run(&Exit, &["exit", "1", "--help"]);
        assert_eq!(res.unwrap(), Flow::Stop);
    }

    #[test]
    fn test_help_lists_builtins_in_order() {
        let (res, out) = run(&Help, &["help", "ignored"]);
        assert_eq!(res.unwrap(), Flow::Continue);

        let cd = out.find("  cd\n").expect("cd listed");
        let help = out.find("  help\n").expect("help listed");
        let exit = out.find("  exit\n").expect("exit listed");
        assert!(cd < help && help < exit, "unexpected order in {out:?}");
        assert!(out.starts_with("bsh: a minimal command interpreter\n"));
    }

    #[test]
    fn test_cd_without_argument_is_usage_error() {
        let _lock = lock_current_dir();
        let orig = env::current_dir().unwrap();

        let (res, _) = run(&Cd, &["cd"]);
        let err = res.unwrap_err();
        assert!(matches!(err, ShellError::MissingArgument { command: "cd" }));
        assert_eq!(err.to_string(), "expected argument to \"cd\"");
        assert_eq!(env::current_dir().unwrap(), orig);
    }

    #[test]
    fn test_cd_nonexistent_path_errors() {
        let _lock = lock_current_dir();
        let orig = env::current_dir().unwrap();

        let (res, _) = run(&Cd, &["cd", "/nonexistent-path-xyz"]);
        let err = res.unwrap_err();
        assert!(matches!(err, ShellError::ChangeDir { .. }));
        assert!(err.to_string().starts_with("cd: /nonexistent-path-xyz: "));
        assert_eq!(env::current_dir().unwrap(), orig);
    }

    #[test]
    fn test_cd_to_absolute_path() {
        let _lock = lock_current_dir();
        let orig = env::current_dir().unwrap();
        let temp = tempfile::tempdir().expect("failed to create temp dir");
        let canonical_temp = fs::canonicalize(temp.path()).unwrap();

        let target = canonical_temp.to_string_lossy().to_string();
        let (res, _) = run(&Cd, &["cd", &target, "extra"]);
        let new_cwd = env::current_dir().unwrap();
        env::set_current_dir(&orig).expect("failed to restore cwd");

        assert_eq!(res.unwrap(), Flow::Continue);
        assert_eq!(fs::canonicalize(new_cwd).unwrap(), canonical_temp);
    }

    #[test]
    fn test_cd_relative_path() {
        let _lock = lock_current_dir();
        let orig = env::current_dir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        env::set_current_dir(temp.path()).unwrap();
        let (res, _) = run(&Cd, &["cd", "sub"]);
        let new_cwd = env::current_dir().unwrap();
        env::set_current_dir(&orig).expect("failed to restore cwd");

        assert_eq!(res.unwrap(), Flow::Continue);
        assert_eq!(
            fs::canonicalize(new_cwd).unwrap(),
            fs::canonicalize(temp.path().join("sub")).unwrap()
        );
    }

    #[test]
    fn test_cd_into_non_utf8_directory() {
        let _lock = lock_current_dir();
        let orig = env::current_dir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9");
        fs::create_dir(temp.path().join(name)).unwrap();

        env::set_current_dir(temp.path()).unwrap();
        let mut out = Vec::<u8>::new();
        let res = Cd.execute(&[OsStr::new("cd"), name], &Registry::default(), &mut out);
        let new_cwd = env::current_dir().unwrap();
        env::set_current_dir(&orig).expect("failed to restore cwd");

        assert_eq!(res.unwrap(), Flow::Continue);
        assert_eq!(new_cwd.file_name(), Some(name));
    }
}
