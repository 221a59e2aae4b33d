/// ANSI escape code stripping
///
/// `adb logcat -v color`, `idevicesyslog` and most terminal capture tools
/// colorize their output. The escape sequences sit directly in front of the
/// level letters and tags, which hides them from the structural rules
/// (`\x1b[31mE/Tag:` has no word boundary before `E`).

use std::borrow::Cow;

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// Strip ANSI escape sequences from a line.
///
/// Handles CSI (`ESC [ ... final`), OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`)
/// and two-byte Fe sequences. Returns `Cow::Borrowed` when the line contains
/// no ESC byte, so clean logs never allocate.
pub fn strip_ansi(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    if !bytes.contains(&ESC) {
        return Cow::Borrowed(input);
    }

    let mut output = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != ESC {
            output.push(bytes[i]);
            i += 1;
            continue;
        }

        // Lone trailing ESC
        if i + 1 >= bytes.len() {
            break;
        }

        match bytes[i + 1] {
            b'[' => {
                i += 2;
                while i < bytes.len() {
                    let b = bytes[i];
                    i += 1;
                    if (0x40..=0x7E).contains(&b) {
                        break;
                    }
                }
            }
            b']' => {
                i += 2;
                while i < bytes.len() {
                    if bytes[i] == BEL {
                        i += 1;
                        break;
                    }
                    if bytes[i] == ESC && bytes.get(i + 1) == Some(&b'\\') {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            }
            0x40..=0x5F => i += 2,
            _ => {
                // Not an escape we understand: drop the ESC, keep the rest
                i += 1;
            }
        }
    }

    // Only whole ASCII-delimited runs were removed, so this is lossless
    // for valid input.
    Cow::Owned(String::from_utf8_lossy(&output).into_owned())
}
