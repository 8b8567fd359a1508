//! Static replies for the informational commands

pub const START: &str = "Welcome! I am your training bot. Use /help to see available commands.";

pub const HELP: &str = "/get_recommendations - Get train recommendations\n\
/get_training - Get training by date\n\
/info - Description of train characteristics";

pub const INFO: &str = "📝 *Train characteristics:*\n\
▫️ *Type*: Light | Marathon | Tempo | Interval | Repeated\n\
▫️ *Duration* - training time\n\
▫️ *Time in Heart Rate Zones (per max heart rate)*: 65–79%, 80–90%, 88–92%, 98–100%, 100%\n\
▫️ *Cadence* - number of steps per minute\n\
▫️ *Distance* - run length\n\
▫️ *Date* - training date in the format YYYY-MM-DD\n";

pub const GET_RECOMMENDATIONS: &str = "*Please enter your training data in the following format:*\n\
<Training type>\n\
<Duration (min)>\n\
<Time in heart rate zones (min)>\n\
<Cadence>\n\
<Distance (km)>\n\
<Date (YYYY-MM-DD)>\n\
`For more details use /info`\n\
----------------------------\n\
🛠 *Example*:\nTempo\n60\n15, 0, 45, 0, 0\n180\n12\n2024-12-20\n";

pub const GET_TRAINING: &str = "Please enter the date (YYYY-MM-DD) to get your training data.";

pub const INVALID_REPORT: &str = "Invalid format or error saving data. Please try again.";
pub const INVALID_DATE: &str = "Invalid date or error fetching data. Please try again.";
pub const NO_TRAINING: &str = "No training data found for this date.";
pub const UNKNOWN_INPUT: &str = "Invalid input. Please use /help to see the available commands.";

/// Separator between records in a date lookup reply
pub const RECORD_SEPARATOR: &str = "\n▫️▫️▫️▫️▫️▫️▫️▫️▫️\n";
