/// Prompt text and the script marker shared by engine and reconciliation.

/// Fixed line prepended to the buffer before sending, hinting to the
/// backend that it is looking at zsh script context. Stripped from the
/// reply before any other trimming.
pub const SCRIPT_MARKER: &str = "#!/bin/zsh\n\n";

/// System instruction describing the output contract.
pub fn completion_system_prompt() -> String {
    "You are a zsh shell expert, please help me complete the following command. \
     Only output the completed command, no need for any other explanation. \
     Do not put the completed command in a code block. \
     The command should be a one-liner meant for the terminal. \
     Shebangs like '#!/bin/bash' or '#!/bin/zsh' should NEVER be in your response. \
     You are on macOS. Avoid commands that are Linux exclusive, like 'apt' or 'yum'. \
     Avoid potentially destructive commands, like 'rm -rf *' or 'sudo', \
     unless absolutely necessary."
        .to_string()
}

/// Preamble introducing the auxiliary context segments.
pub fn context_preamble() -> String {
    "Here is additional context to help with the command completion. \
     You may find some of this information useful, but you are not required \
     to use any of it unless it is relevant to the command."
        .to_string()
}
