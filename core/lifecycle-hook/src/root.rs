//! Prints the resolved project root (diagnostics for hook installs).

use crate::context::HookContext;
use crate::guard;

pub fn run(ctx: &HookContext, verbose: bool) {
    match ctx.root() {
        Ok(resolved) if verbose => {
            guard::print(format_args!("{}\t({})", resolved.path.display(), resolved.strategy))
        }
        Ok(resolved) => guard::print(resolved.path.display()),
        Err(err) => guard::print_err(format_args!("⚠️ {}", err)),
    }
}
