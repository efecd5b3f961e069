//! The fixed, ordered table of canned assistant responses.
//!
//! Entry order is the matching priority: the first trigger that matches an
//! input wins. Explanatory topics come first and the anchored action commands
//! last, except the call queue command, which sits directly ahead of the call
//! queue topic so "create call queue" produces a card instead of the explainer.

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};
use crate::response::{ActionChip, CardKind, PanelMode, Response};

const DOCS_LANDING: &str = "https://help.webex.com/landing/calling/";

/// A trigger expression paired with the response it selects
#[derive(Debug, Clone)]
pub struct ResponsePattern {
    trigger: Regex,
    pub response: Response,
}

impl ResponsePattern {
    /// Compile `pattern` case-insensitively
    pub fn new(pattern: &str, response: Response) -> Result<Self> {
        let trigger = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidTrigger {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self { trigger, response })
    }

    pub fn pattern(&self) -> &str {
        self.trigger.as_str()
    }

    /// Unanchored search anywhere in the input
    pub fn is_match(&self, input: &str) -> bool {
        self.trigger.is_match(input)
    }
}

#[derive(Debug, Clone)]
pub struct ResponseCatalog {
    patterns: Vec<ResponsePattern>,
    default_response: Response,
    welcome: Response,
}

impl ResponseCatalog {
    pub fn new(
        entries: Vec<(&str, Response)>,
        default_response: Response,
        welcome: Response,
    ) -> Result<Self> {
        let patterns = entries
            .into_iter()
            .map(|(pattern, response)| ResponsePattern::new(pattern, response))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(entries = patterns.len(), "response catalog compiled");

        Ok(Self {
            patterns,
            default_response,
            welcome,
        })
    }

    /// The calling setup catalog shipped with the console
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_entries(), default_response(), welcome_response())
    }

    pub fn patterns(&self) -> &[ResponsePattern] {
        &self.patterns
    }

    pub fn default_response(&self) -> &Response {
        &self.default_response
    }

    pub fn welcome(&self) -> &Response {
        &self.welcome
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn chip(id: &str, label: &str, action: &str) -> ActionChip {
    ActionChip::new(id, label, action)
}

fn builtin_entries() -> Vec<(&'static str, Response)> {
    vec![
        // Locations
        (
            r"what is a location|what are locations|explain location",
            Response::text(
                "A location represents a physical site where your calling services are deployed (like an office, branch, or building).\n\n\
                 Each location includes:\n\
                 • Physical address for emergency calling (E911)\n\
                 • Timezone for scheduling and call routing\n\
                 • Main number as the default outbound caller ID\n\
                 • PSTN connection defining how calls reach the phone network\n\n\
                 You can have multiple locations, each with its own calling configuration.\n\n\
                 📚 Learn more: https://help.webex.com/article/nli32cb/",
            )
            .with_chips(vec![
                chip("add-location", "Add Location", "add-location"),
                chip("more-locations", "Learn More", "learn-locations"),
            ]),
        ),
        (
            r"multiple locations|how many locations|several locations|can i add multiple locations",
            Response::text(
                "Yes! You can add as many locations as you need - one for each physical site where your organization operates.\n\n\
                 Why multiple locations matter:\n\
                 • Different emergency calling addresses\n\
                 • Separate business hours and schedules\n\
                 • Local phone numbers for each site\n\
                 • Regional call routing preferences\n\n\
                 Best practice: Create a location for each office, branch, or building where people will be making calls.\n\n\
                 📚 Location management guide: https://help.webex.com/article/nli32cb/",
            )
            .with_chips(vec![chip("add-first-location", "Add First Location", "add-location")])
            .with_suggestions(&["How to name locations?", "Can I move users between locations?"]),
        ),
        (
            r"multiple addresses|batch add|bulk add|add many at once",
            Response::text(
                "Great question! The ability to add multiple items at once depends on what you're configuring:\n\n\
                 You CAN bulk add:\n\
                 • Users - CSV import or directory sync\n\
                 • Phone numbers - Order multiple numbers in one request\n\
                 • Devices - Bulk provisioning with activation codes\n\
                 • Emergency addresses - Import from spreadsheet\n\n\
                 Configure individually:\n\
                 • Locations - Each location needs unique settings\n\
                 • PSTN connections - Each trunk configured separately\n\
                 • Auto attendants - Each menu system is unique\n\n\
                 Would you like help with any of these?\n\n\
                 📚 Bulk provisioning: https://help.webex.com/article/n2x57bb/",
            )
            .with_chips(vec![
                chip("bulk-users", "Bulk Import Users", "bulk-import-users"),
                chip("order-numbers", "Order Multiple Numbers", "order-numbers"),
            ]),
        ),
        // PSTN
        (
            r"what is pstn|explain pstn|pstn meaning",
            Response::text(
                "PSTN stands for Public Switched Telephone Network - it's the traditional phone network that lets you make calls to regular phone numbers outside your organization.\n\n\
                 Why you need it:\n\
                 • Call mobile phones and landlines\n\
                 • Receive calls from external numbers\n\
                 • Make emergency (911) calls\n\n\
                 Connection options:\n\
                 • Cloud Connected PSTN - Cisco provides the connection (easiest)\n\
                 • Local Gateway - Use your existing SIP trunks\n\
                 • Premises-Based - Connect through on-premises equipment\n\n\
                 📚 PSTN options explained: https://help.webex.com/article/n0t07n8/",
            )
            .with_chips(vec![
                chip("choose-pstn", "Choose Connection Type", "setup-pstn"),
                chip("compare-options", "Compare Options", "compare-pstn"),
            ])
            .with_suggestions(&["Which PSTN type is best?", "Do I need PSTN for internal calls?"]),
        ),
        (
            r"which pstn|best pstn|pstn option|recommend pstn|which pstn type should i choose",
            Response::text(
                "The best PSTN option depends on your situation:\n\n\
                 Cloud Connected PSTN (Recommended for most):\n\
                 • Easiest to set up - no hardware needed\n\
                 • Cisco manages call quality and routing\n\
                 • Automatic failover and redundancy\n\
                 • May have higher per-minute costs\n\n\
                 Local Gateway:\n\
                 • Use existing SIP trunk contracts\n\
                 • More control over call routing\n\
                 • Requires configuration and maintenance\n\
                 • You manage equipment and troubleshooting\n\n\
                 Premises-Based PSTN:\n\
                 • Keep existing PBX investment\n\
                 • Gradual migration path\n\
                 • Most complex setup\n\
                 • Requires on-site equipment\n\n\
                 For new deployments, Cloud Connected PSTN is usually the best choice.\n\n\
                 📚 Compare PSTN options: https://help.webex.com/article/n0t07n8/\n\
                 📚 Local Gateway setup: https://help.webex.com/article/n18glgz/",
            )
            .with_chips(vec![
                chip("cloud-pstn", "Set Up Cloud PSTN", "cloud-connected-pstn"),
                chip("local-gateway", "Configure Local Gateway", "local-gateway"),
            ]),
        ),
        (
            r"internal calls|calls between users|within organization|without pstn",
            Response::text(
                "Great question! You don't need PSTN for internal calls between Webex users.\n\n\
                 Internal calls work automatically:\n\
                 • User-to-user calls within your organization\n\
                 • Calls between Webex apps (desktop, mobile, web)\n\
                 • Video calls and screen sharing\n\
                 • All FREE - no per-minute charges!\n\n\
                 You only need PSTN for:\n\
                 • Calling external phone numbers (mobile, landlines)\n\
                 • Receiving calls from outside your organization\n\
                 • Emergency services (911/E911)\n\n\
                 You could start with just locations and users, then add PSTN later when you need external calling.",
            )
            .with_chips(vec![
                chip("skip-pstn", "Skip PSTN for Now", "skip-pstn"),
                chip("setup-pstn", "Set Up PSTN Anyway", "setup-pstn"),
            ]),
        ),
        // Phone numbers
        (
            r"how many numbers|how many phone numbers|number of numbers",
            Response::text(
                "The number of phone numbers you need depends on your use case:\n\n\
                 Typical scenarios:\n\
                 • 1 number - Small business main line\n\
                 • 1 per user - Direct dial for everyone\n\
                 • 1 per location - Main number for each office\n\
                 • 1 per department - Sales, support, etc.\n\
                 • Extra for services - Auto attendants, call queues, fax\n\n\
                 Pro tip: Start with fewer numbers than users. Not everyone needs a direct line - many users can share a main number and use extensions.\n\n\
                 Example for 100 users:\n\
                 • Main line: 1 number\n\
                 • Departments: 5-10 numbers\n\
                 • Direct lines: 20-30 for executives/sales\n\
                 • Total: ~30-40 numbers (not 100!)\n\n\
                 📚 Phone number management: https://help.webex.com/article/nmgvbb3/",
            )
            .with_suggestions(&["Can I port my existing numbers?", "What about toll-free numbers?"]),
        ),
        (
            r"port number|keep my number|transfer number|existing number",
            Response::text(
                "Yes! You can port (transfer) your existing phone numbers to Webex Calling.\n\n\
                 Porting process:\n\
                 1. Submit port request - Provide numbers and carrier info\n\
                 2. Carrier approval - 2-4 weeks typically\n\
                 3. Schedule port date - Choose when to switch\n\
                 4. Numbers go live - Usually happens overnight\n\n\
                 Important notes:\n\
                 • Don't cancel your old service until port completes\n\
                 • Keep your numbers active during the process\n\
                 • Port usually takes 2-4 weeks for wireless, 1-2 weeks for landlines\n\
                 • You can port toll-free numbers too!\n\n\
                 Alternative: Order new numbers now, port later.\n\n\
                 📚 Number porting guide: https://help.webex.com/article/n96yw5d/\n\
                 📚 Port request checklist: https://help.webex.com/article/n3pbbge/",
            )
            .with_chips(vec![
                chip("start-port", "Start Port Request", "port-numbers"),
                chip("order-new", "Order New Numbers", "order-numbers"),
            ]),
        ),
        (
            r"toll free|800 number|888 number",
            Response::text(
                "Yes, Webex Calling supports toll-free numbers (800, 888, 877, 866, 855, 844, 833).\n\n\
                 You can:\n\
                 • Order new toll-free numbers\n\
                 • Port existing toll-free numbers\n\
                 • Assign to auto attendants or users\n\
                 • Track usage and costs\n\n\
                 Common uses:\n\
                 • Customer support lines\n\
                 • Sales hotlines\n\
                 • National main numbers\n\n\
                 Cost: Toll-free numbers have per-minute charges (varies by plan). Regular numbers are usually included in your license.\n\n\
                 📚 Toll-free number guide: https://help.webex.com/article/nmgvbb3/",
            )
            .with_chips(vec![chip("order-tollfree", "Order Toll-Free", "order-tollfree")]),
        ),
        // Emergency calling
        (
            r"what is e911|explain e911|emergency calling|911|how does emergency calling work",
            Response::text(
                "E911 (Enhanced 911) ensures emergency responders know exactly where you are when you call 911.\n\n\
                 Why it's critical:\n\
                 • 911 operators see your physical address\n\
                 • First responders come to the right location\n\
                 • Required by law for VoIP services in the US\n\n\
                 How it works:\n\
                 • Each location has emergency addresses\n\
                 • Users/devices are assigned to addresses\n\
                 • When someone dials 911, their address is sent automatically\n\n\
                 Important: You must configure this before users make calls!\n\n\
                 Dynamic E911: For remote workers or traveling employees, addresses can update based on their network location.\n\n\
                 📚 Emergency calling setup: https://help.webex.com/article/njqxwcb/\n\
                 📚 E911 requirements: https://help.webex.com/article/n676cq8/",
            )
            .with_chips(vec![
                chip("add-addresses", "Add Emergency Addresses", "add-emergency-addresses"),
                chip("test-e911", "Learn About Testing", "test-e911"),
            ])
            .with_suggestions(&["What about remote workers?", "How to test E911?"]),
        ),
        (
            r"remote work|home office|work from home|traveling|how to handle remote workers",
            Response::text(
                "Great question! Remote and traveling users need special E911 consideration.\n\n\
                 Options for remote workers:\n\n\
                 1. Static E911 (Simplest)\n\
                 • User sets their home address\n\
                 • Must update manually if they move\n\
                 • Good for: Permanent remote workers\n\n\
                 2. Dynamic E911 (Advanced)\n\
                 • Address updates automatically based on network\n\
                 • Works with RedSky or similar providers\n\
                 • Good for: Mobile workers, multiple offices\n\n\
                 3. Nomadic E911\n\
                 • Users must confirm/update address before calling 911\n\
                 • Pop-up prompts for address verification\n\
                 • Good for: Frequent travelers\n\n\
                 Important: Users must keep addresses current. It's a life safety issue!\n\n\
                 📚 Remote worker E911: https://help.webex.com/article/nz0iocw/\n\
                 📚 Dynamic E911 providers: https://help.webex.com/article/nhwpbg7/",
            )
            .with_chips(vec![
                chip("setup-static", "Set Up Static E911", "static-e911"),
                chip("learn-dynamic", "Learn About Dynamic E911", "dynamic-e911"),
            ]),
        ),
        // Users and licenses
        (
            r"how many licenses|what license|which license|license type|what license types are available",
            Response::text(
                "Webex Calling has several license types:\n\n\
                 Professional (Most common):\n\
                 • Full calling features\n\
                 • Voicemail, call forwarding, etc.\n\
                 • Mobile/desktop apps included\n\
                 • Direct phone number assignment\n\n\
                 Workspace:\n\
                 • For shared devices (conference rooms)\n\
                 • Desk phones and room systems\n\
                 • No personal features (voicemail, etc.)\n\n\
                 Common Area:\n\
                 • Lobbies, hallways, break rooms\n\
                 • Basic calling only\n\
                 • Shared by multiple people\n\n\
                 You need one license per person or device that will make/receive calls. Users with both a desk phone and Webex app only need one license!\n\n\
                 📚 License comparison: https://help.webex.com/article/nmuj09u/\n\
                 📚 User setup guide: https://help.webex.com/article/narp57ab/",
            )
            .with_suggestions(&["Can users share licenses?", "What about conference rooms?"]),
        ),
        (
            r"conference room|meeting room|room system|how to set up conference rooms",
            Response::text(
                "Conference rooms and meeting spaces use Workspace licenses (not user licenses).\n\n\
                 Setting up a conference room:\n\
                 1. Create a Workspace (not a user)\n\
                 2. Assign a Workspace license\n\
                 3. Add a phone number (optional)\n\
                 4. Register the room device\n\
                 5. Configure calling features\n\n\
                 Devices that work:\n\
                 • Cisco Room Devices (Room Kit, Board, etc.)\n\
                 • Webex Desk devices\n\
                 • SIP desk phones\n\
                 • Webex Share devices\n\n\
                 Key differences from users:\n\
                 • No voicemail by default\n\
                 • No personal settings\n\
                 • Optimized for shared use\n\
                 • Calendar integration for room booking\n\n\
                 📚 Workspace setup: https://help.webex.com/article/narp57ab/\n\
                 📚 Device registration: https://help.webex.com/article/n2e3tm9/",
            )
            .with_chips(vec![chip("add-workspace", "Add Conference Room", "add-workspace")]),
        ),
        // Auto attendants and call queues
        (
            r"what is auto attendant|explain auto attendant|what is aa|what is ivr",
            Response::text(
                "An Auto Attendant (AA) is like a virtual receptionist that answers calls and routes them based on caller input.\n\n\
                 How it works:\n\
                 1. Caller dials your main number\n\
                 2. Hears a greeting: \"Press 1 for Sales, 2 for Support...\"\n\
                 3. Presses a key\n\
                 4. Gets routed to the right department\n\n\
                 Common uses:\n\
                 • Main company phone line\n\
                 • Department directories\n\
                 • After-hours handling\n\
                 • Holiday routing\n\n\
                 Features:\n\
                 • Custom greetings (recorded or text-to-speech)\n\
                 • Menu options (press 1, 2, 3...)\n\
                 • Extension dialing (\"dial by name\")\n\
                 • Business hours routing\n\
                 • Voicemail overflow\n\n\
                 Pro tip: Keep menus simple - 3-4 options max!\n\n\
                 📚 Auto Attendant setup: https://help.webex.com/article/n1bplybb/\n\
                 📚 Best practices guide: https://help.webex.com/article/njjgts/",
            )
            .with_chips(vec![chip("create-aa", "Create Auto Attendant", "create-auto-attendant")])
            .with_suggestions(&["How to record greetings?", "Can I have multiple menus?"]),
        ),
        (
            r"^(add|create|setup) (call queue|queue)",
            Response::text("Let's create a call queue. What routing strategy would you like?")
                .with_card(CardKind::CallQueue)
                .with_chips(vec![
                    chip("rr", "Round-robin", "set-routing-round-robin"),
                    chip("li", "Longest idle", "set-routing-longest-idle"),
                ])
                .with_suggestions(&["What is a call queue?", "Which routing strategy is best?"]),
        ),
        (
            r"call queue|what is queue|explain queue",
            Response::text(
                "A Call Queue distributes incoming calls to a group of agents (like support or sales teams).\n\n\
                 How it works:\n\
                 1. Callers dial the queue number\n\
                 2. Hear music or announcements while waiting\n\
                 3. Call goes to next available agent\n\
                 4. If all busy, callers wait in queue\n\n\
                 Routing strategies:\n\
                 • Round-robin - Fair distribution to all agents\n\
                 • Longest idle - Agents who've been free longest\n\
                 • Simultaneous - Rings all agents at once\n\
                 • Sequential - Tries agents in specific order\n\n\
                 Features:\n\
                 • Queue announcements (\"You're caller number 3...\")\n\
                 • Estimated wait time\n\
                 • Overflow to voicemail after X minutes\n\
                 • Agent join/leave controls\n\
                 • Real-time queue statistics\n\n\
                 Common for: Support lines, sales teams, help desks\n\n\
                 📚 Call Queue setup: https://help.webex.com/article/n1bplybb/\n\
                 📚 Queue analytics: https://help.webex.com/article/njro6t/",
            )
            .with_chips(vec![chip("create-queue", "Create Call Queue", "create-call-queue")])
            .with_suggestions(&["Which routing is best?", "How long should queue be?"]),
        ),
        // General guidance
        (
            r"where do i start|getting started|first step|begin setup",
            Response::text(
                "Let's get you started with Webex Calling! Here's the recommended order:\n\n\
                 Step 1: Foundation (Required)\n\
                 1. Add your first location\n\
                 2. Set up PSTN connection\n\
                 3. Order or port phone numbers\n\n\
                 Step 2: Location Configuration\n\
                 4. Assign main number to location\n\
                 5. Configure emergency calling (E911)\n\
                 6. Set business hours\n\n\
                 Step 3: Users & Devices\n\
                 7. Add users with licenses\n\
                 8. Assign phone numbers\n\
                 9. Register devices\n\n\
                 Step 4: Advanced Features\n\
                 10. Create auto attendant (optional)\n\
                 11. Set up call queues (optional)\n\n\
                 Start with: Add your first location. Everything else builds from there!\n\n\
                 📚 Getting started guide: https://help.webex.com/article/narp57ab/\n\
                 📚 Setup checklist: https://help.webex.com/article/n7ek59/",
            )
            .with_chips(vec![
                chip("add-location", "Add First Location", "add-location"),
                chip("view-checklist", "View Full Checklist", "view-checklist"),
            ]),
        ),
        (
            r"help|what can you do",
            Response::text(&format!(
                "I'm here to help you set up Webex Calling!\n\n\
                 I can help you:\n\
                 • Answer questions about the setup process\n\
                 • Explain calling concepts (PSTN, E911, etc.)\n\
                 • Guide you through configuration steps\n\
                 • Provide best practices and recommendations\n\
                 • Create configurations for locations, queues, etc.\n\n\
                 Try asking:\n\
                 • \"What is a location?\"\n\
                 • \"How many phone numbers do I need?\"\n\
                 • \"Can I port my existing numbers?\"\n\
                 • \"What's the difference between auto attendant and call queue?\"\n\
                 • \"How do I set up emergency calling?\"\n\
                 • \"Where do I start?\"\n\n\
                 Or tell me what you want to do:\n\
                 • \"Add a location\"\n\
                 • \"Set up PSTN\"\n\
                 • \"Create an auto attendant\"\n\n\
                 📚 Webex Calling documentation: {DOCS_LANDING}\n\
                 📚 Admin training: https://help.webex.com/article/nmlwsqk/"
            ))
            .with_panel(PanelMode::Suggestions),
        ),
        // Action commands
        (
            r"^(add|create|setup|configure) location",
            Response::text(
                "Let me help you add a location. I'll create a configuration template for you.",
            )
            .with_card(CardKind::Location)
            .with_chips(vec![
                chip("add-address", "Set Address", "add-address"),
                chip("set-timezone", "Set Timezone", "set-timezone"),
            ])
            .with_suggestions(&["What is a location?", "Can I add multiple locations?"]),
        ),
        (
            r"^(add|create|setup|configure) pstn",
            Response::text(
                "I'll help you set up your PSTN connection. Choose your connection type:",
            )
            .with_chips(vec![
                chip("cloud-connected", "Cloud Connected PSTN", "cloud-connected-pstn"),
                chip("local-gateway", "Local Gateway", "local-gateway"),
            ])
            .with_suggestions(&["What is PSTN?", "Which PSTN type should I choose?"]),
        ),
        (
            r"^(add|order|create) phone number",
            Response::text("Let's add phone numbers to your organization.")
                .with_card(CardKind::PhoneNumbers)
                .with_chips(vec![
                    chip("order-new", "Order New Numbers", "order-numbers"),
                    chip("port-existing", "Port Existing Numbers", "port-numbers"),
                ])
                .with_suggestions(&["How many numbers do I need?", "Can I port my numbers?"]),
        ),
        (
            r"^(add|create|setup) (auto attendant|aa)",
            Response::text(
                "I'll create an Auto Attendant for you. This will greet callers and route them based on menu options.",
            )
            .with_card(CardKind::AutoAttendant)
            .with_chips(vec![
                chip("add-menu", "Add Menu Options", "add-menu"),
                chip("record-greeting", "Record Greeting", "record-greeting"),
            ])
            .with_suggestions(&["What is an auto attendant?", "How to record greetings?"]),
        ),
    ]
}

fn default_response() -> Response {
    Response::text(&format!(
        "I can help you with that! Could you tell me more about what you'd like to know?\n\n\
         Common topics:\n\
         • Locations and PSTN setup\n\
         • Phone numbers and emergency calling\n\
         • Users, licenses, and devices\n\
         • Auto attendants and call queues\n\
         • Best practices and recommendations\n\n\
         Try asking:\n\
         • \"What is [concept]?\" for explanations\n\
         • \"How do I [task]?\" for instructions\n\
         • \"Can I [action]?\" for capabilities\n\
         • Or just tell me what you want to configure!\n\n\
         📚 Browse all documentation: {DOCS_LANDING}"
    ))
    .with_chips(vec![
        chip("help", "What can you help with?", "show-help"),
        chip("start", "Where do I start?", "getting-started"),
    ])
    .with_panel(PanelMode::Suggestions)
}

fn welcome_response() -> Response {
    Response::text(&format!(
        "Welcome to Webex Calling Setup!\n\n\
         I'm here to help you configure your calling services. You can ask me questions about the setup process, or tell me what you'd like to configure.\n\n\
         Try asking:\n\
         • \"Where do I start?\"\n\
         • \"What is a location?\"\n\
         • \"How many phone numbers do I need?\"\n\
         • \"What's the difference between auto attendant and call queue?\"\n\n\
         Or tell me:\n\
         • \"Add a location\"\n\
         • \"Set up PSTN\"\n\
         • \"Create a call queue\"\n\n\
         📚 Need help? Check out the full documentation: {DOCS_LANDING}"
    ))
    .with_chips(vec![
        chip("start", "Where do I start?", "getting-started"),
        chip("add-location", "Add Location", "add-location"),
        chip("help", "What can you help with?", "show-help"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_catalog_compiles() {
        let catalog = ResponseCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 22);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_chip_ids_unique_within_each_response() {
        let catalog = ResponseCatalog::builtin().unwrap();
        let responses = catalog
            .patterns()
            .iter()
            .map(|p| &p.response)
            .chain([catalog.default_response(), catalog.welcome()]);

        for response in responses {
            let chips = response.chips.as_deref().unwrap_or_default();
            let ids: HashSet<&str> = chips.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids.len(), chips.len(), "duplicate chip id in {:?}", response.content);
        }
    }

    #[test]
    fn test_invalid_trigger_is_reported() {
        let err = ResponsePattern::new("(unclosed", Response::text("x")).unwrap_err();
        assert!(matches!(err, Error::InvalidTrigger { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_triggers_ignore_case() {
        let pattern = ResponsePattern::new("what is pstn", Response::text("x")).unwrap();
        assert!(pattern.is_match("WHAT IS PSTN?"));
        assert!(pattern.is_match("so, what is pstn anyway"));
    }

    #[test]
    fn test_anchored_trigger_only_matches_at_start() {
        let pattern = ResponsePattern::new(r"^(add|create) pstn", Response::text("x")).unwrap();
        assert!(pattern.is_match("Create PSTN connection"));
        assert!(!pattern.is_match("please create pstn"));
    }

    #[test]
    fn test_default_response_switches_to_suggestions() {
        let catalog = ResponseCatalog::builtin().unwrap();
        assert_eq!(catalog.default_response().switches_panel, Some(PanelMode::Suggestions));
        assert!(catalog.welcome().has_chip_action("add-location"));
    }
}
